use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /Score/submit-score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub player_name: String,
    pub player_score: i32,
}

/// Successful submission response including where the player landed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreResponse {
    pub message: String,
    pub rank: u64,
    pub total_players: u64,
}

/// One row of the leaderboard as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u64,
    pub player_name: String,
    pub player_score: i32,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /Score/get-rankings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRankingsResponse {
    pub rankings: Vec<LeaderboardEntry>,
    pub total_count: u64,
    pub requested_count: i64,
}
