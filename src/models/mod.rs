pub mod record;
pub mod responses;

pub use record::ScoreRecord;
pub use responses::{
    GetRankingsResponse, LeaderboardEntry, SubmitScoreRequest, SubmitScoreResponse,
};
