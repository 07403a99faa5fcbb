use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::db::{RecordStore, StoreError};
use crate::models::ScoreRecord;

/// Maximum page size for top-N queries. Larger requests are clamped by the
/// HTTP layer before they reach the service.
pub const MAX_TOP_SCORES: i64 = 1000;

/// Computes leaderboard positions from comparison counts against the record
/// store.
///
/// Rank is a total order: score descending, ties broken in favor of the
/// earlier submission. Two queries with the same inputs always agree, which
/// is what makes repeated leaderboard reads reproducible.
#[derive(Clone)]
pub struct RankingService {
    store: Arc<dyn RecordStore>,
}

impl RankingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Rank of a record with the given score and submission time.
    ///
    /// `1 + |strictly higher scores| + |equal scores submitted earlier|`.
    /// A freshly inserted record participates in its own rank query; its
    /// `created_at` is never strictly earlier than itself, so it does not
    /// count itself. On store failure the rank is unavailable and callers
    /// degrade rather than invent a position.
    pub async fn compute_rank(
        &self,
        score: i32,
        created_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let higher = self.store.count_scores_above(score).await?;
        let earlier_ties = self.store.count_earlier_at_score(score, created_at).await?;
        let rank = 1 + higher + earlier_ties;

        debug!(score, higher, earlier_ties, rank, "Computed rank");
        Ok(rank)
    }

    /// Total number of submitted records. An empty store is `Ok(0)`.
    pub async fn total_players(&self) -> Result<u64, StoreError> {
        self.store.count_records().await
    }

    /// Up to `count` best records, score descending with earlier submission
    /// first among ties. `count` must be positive; callers clamp it to
    /// [`MAX_TOP_SCORES`] beforehand. An empty store yields an empty vec.
    pub async fn top_scores(&self, count: i64) -> Result<Vec<ScoreRecord>, StoreError> {
        if count <= 0 {
            return Err(StoreError::InvalidData(format!(
                "count must be positive, got {}",
                count
            )));
        }
        self.store.find_top(count).await
    }
}
