use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// A single score submission as stored in the records collection.
///
/// BSON field names match the documents written by earlier deployments, so
/// the service can point at an existing collection without a migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Assigned by the store on insert; never set by callers.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(rename = "PlayerName")]
    pub player_name: String,

    /// Any integer is a valid score, including zero and negatives.
    #[serde(rename = "PlayerScore")]
    pub player_score: i32,

    /// Server-clock submission time; tie-breaker for equal scores.
    #[serde(rename = "CreatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Build a new record stamped with the current server time.
    pub fn new(player_name: impl Into<String>, player_score: i32) -> Self {
        Self {
            id: None,
            player_name: player_name.into(),
            player_score,
            created_at: Utc::now(),
        }
    }
}
