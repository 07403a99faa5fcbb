pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod ranking;
pub mod secrets;

// Re-export commonly used types
pub use config::Config;
pub use db::{MongoRecordStore, RecordStore, StoreError};
pub use models::{
    GetRankingsResponse, LeaderboardEntry, ScoreRecord, SubmitScoreRequest, SubmitScoreResponse,
};
pub use ranking::{RankingService, MAX_TOP_SCORES};
