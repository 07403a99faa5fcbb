use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::FindOptions;
use mongodb::Collection;
use tracing::debug;

use crate::db::errors::Result;
use crate::models::ScoreRecord;

/// Persistence seam for score records.
///
/// The store is append-only: records are inserted once and never updated or
/// deleted. Everything ranking needs is a comparison count or one sorted
/// page, so those are the only read operations exposed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record. Failures surface immediately; there is no retry,
    /// so a failed submission never leaves partial state behind.
    async fn insert_record(&self, record: &ScoreRecord) -> Result<()>;

    /// Number of records with a strictly higher score.
    async fn count_scores_above(&self, score: i32) -> Result<u64>;

    /// Number of records at exactly `score` submitted before `created_at`.
    async fn count_earlier_at_score(
        &self,
        score: i32,
        created_at: DateTime<Utc>,
    ) -> Result<u64>;

    /// Total number of stored records.
    async fn count_records(&self) -> Result<u64>;

    /// Up to `limit` records ordered by score descending, earlier submission
    /// first among ties. An empty store yields an empty vec, not an error.
    async fn find_top(&self, limit: i64) -> Result<Vec<ScoreRecord>>;
}

/// [`RecordStore`] backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoRecordStore {
    collection: Collection<ScoreRecord>,
}

impl MongoRecordStore {
    pub fn new(collection: Collection<ScoreRecord>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    #[tracing::instrument(
        skip(self, record),
        fields(player_name = %record.player_name, player_score = record.player_score)
    )]
    async fn insert_record(&self, record: &ScoreRecord) -> Result<()> {
        let result = self.collection.insert_one(record, None).await?;
        debug!(id = %result.inserted_id, "Inserted score record");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn count_scores_above(&self, score: i32) -> Result<u64> {
        let count = self
            .collection
            .count_documents(doc! { "PlayerScore": { "$gt": score } }, None)
            .await?;
        Ok(count)
    }

    #[tracing::instrument(skip(self))]
    async fn count_earlier_at_score(
        &self,
        score: i32,
        created_at: DateTime<Utc>,
    ) -> Result<u64> {
        let created_at = BsonDateTime::from_chrono(created_at);
        let count = self
            .collection
            .count_documents(
                doc! { "PlayerScore": score, "CreatedAt": { "$lt": created_at } },
                None,
            )
            .await?;
        Ok(count)
    }

    #[tracing::instrument(skip(self))]
    async fn count_records(&self) -> Result<u64> {
        let count = self.collection.count_documents(None, None).await?;
        Ok(count)
    }

    #[tracing::instrument(skip(self))]
    async fn find_top(&self, limit: i64) -> Result<Vec<ScoreRecord>> {
        let options = FindOptions::builder()
            .sort(doc! { "PlayerScore": -1, "CreatedAt": 1 })
            .limit(limit)
            .build();

        let cursor = self.collection.find(None, options).await?;
        let records = cursor.try_collect().await?;
        Ok(records)
    }
}
