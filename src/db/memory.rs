use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::errors::{Result, StoreError};
use crate::db::store::RecordStore;
use crate::models::ScoreRecord;

/// In-memory [`RecordStore`] for unit tests.
///
/// Mirrors the Mongo ordering semantics exactly and can be flipped into a
/// failing mode per operation class to exercise the degraded paths.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<ScoreRecord>>,
    pub fail_inserts: AtomicBool,
    pub fail_reads: AtomicBool,
    pub insert_calls: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ScoreRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionError(
                "simulated read failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_record(&self, record: &ScoreRecord) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionError(
                "simulated insert failure".to_string(),
            ));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn count_scores_above(&self, score: i32) -> Result<u64> {
        self.check_reads()?;
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| r.player_score > score).count() as u64)
    }

    async fn count_earlier_at_score(
        &self,
        score: i32,
        created_at: DateTime<Utc>,
    ) -> Result<u64> {
        self.check_reads()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.player_score == score && r.created_at < created_at)
            .count() as u64)
    }

    async fn count_records(&self) -> Result<u64> {
        self.check_reads()?;
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn find_top(&self, limit: i64) -> Result<Vec<ScoreRecord>> {
        self.check_reads()?;
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| {
            b.player_score
                .cmp(&a.player_score)
                .then(a.created_at.cmp(&b.created_at))
        });
        records.truncate(limit.max(0) as usize);
        Ok(records)
    }
}
