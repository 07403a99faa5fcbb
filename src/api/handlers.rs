use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::db::StoreError;
use crate::models::{
    GetRankingsResponse, LeaderboardEntry, ScoreRecord, SubmitScoreRequest, SubmitScoreResponse,
};
use crate::ranking::MAX_TOP_SCORES;

#[derive(Debug, Deserialize)]
pub struct RankingsQueryParams {
    #[serde(default = "default_count")]
    pub count: i64,
}

fn default_count() -> i64 {
    10
}

#[tracing::instrument(skip_all)]
pub async fn submit_score_handler(
    State(state): State<AppState>,
    request: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = request
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;

    info!(
        player_name = %request.player_name,
        player_score = request.player_score,
        "Processing score submission"
    );

    // Input validation happens before any store access
    if request.player_name.trim().is_empty() {
        warn!("Rejected submission with empty player name");
        return Err(ApiError::BadRequest("playerName is required".to_string()));
    }

    let record = ScoreRecord::new(request.player_name, request.player_score);
    state.store.insert_record(&record).await.map_err(|e| {
        error!(error = %e, "Failed to persist score record");
        ApiError::Database("Failed to submit score".to_string())
    })?;

    // The freshly inserted record participates in its own rank query. A
    // ranking failure degrades the response but never undoes the write.
    match rank_new_record(&state, &record).await {
        Ok((rank, total_players)) => {
            info!(rank, total_players, "Score submitted and ranked");
            Ok(Json(SubmitScoreResponse {
                message: "Score submitted successfully".to_string(),
                rank,
                total_players,
            })
            .into_response())
        }
        Err(e) => {
            warn!(error = %e, "Score submitted but ranking unavailable");
            Ok("Score submitted successfully, but ranking could not be calculated"
                .into_response())
        }
    }
}

async fn rank_new_record(state: &AppState, record: &ScoreRecord) -> Result<(u64, u64), StoreError> {
    let rank = state
        .ranking
        .compute_rank(record.player_score, record.created_at)
        .await?;
    let total_players = state.ranking.total_players().await?;
    Ok((rank, total_players))
}

#[tracing::instrument(skip(state))]
pub async fn get_rankings_handler(
    State(state): State<AppState>,
    Query(params): Query<RankingsQueryParams>,
) -> ApiResult<Json<GetRankingsResponse>> {
    info!(count = params.count, "Processing rankings request");

    if params.count <= 0 {
        return Err(ApiError::BadRequest(
            "count must be greater than 0".to_string(),
        ));
    }

    // Oversized requests are clamped, not rejected
    let requested_count = params.count.min(MAX_TOP_SCORES);
    if requested_count < params.count {
        warn!(count = params.count, "Clamped oversized rankings request");
    }

    let top = state
        .ranking
        .top_scores(requested_count)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to read rankings");
            ApiError::Database("Failed to retrieve rankings".to_string())
        })?;

    // A failed total count after a successful page read falls back to the
    // page length rather than failing the whole request.
    let total_count = match state.ranking.total_players().await {
        Ok(total) => total,
        Err(e) => {
            warn!(error = %e, "Total player count unavailable, using page length");
            top.len() as u64
        }
    };

    let rankings: Vec<LeaderboardEntry> = top
        .into_iter()
        .enumerate()
        .map(|(index, record)| LeaderboardEntry {
            rank: index as u64 + 1,
            player_name: record.player_name,
            player_score: record.player_score,
            created_at: record.created_at,
        })
        .collect();

    info!(
        returned = rankings.len(),
        requested = requested_count,
        "Rankings retrieved"
    );

    Ok(Json(GetRankingsResponse {
        rankings,
        total_count,
        requested_count,
    }))
}
