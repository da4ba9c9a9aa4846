use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::log;
use common::scores::api::{ErrorResponse, PlayerBestResponse, ScoreResponse, ScoreSubmission};
use common::scores::{FileLeaderboardStore, LeaderboardEntry, LeaderboardStore, StoreError};
use common::PlayerId;

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<FileLeaderboardStore>,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let status = match e {
            StoreError::InvalidSubmission(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log!("Leaderboard store error: {}", e);
        }
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

pub async fn submit_score(
    State(state): State<ApiState>,
    submission: Result<Json<ScoreSubmission>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let Json(submission) = submission?;
    log!(
        "Player {} ({}) scored {}",
        submission.player_id,
        submission.player_name,
        submission.score
    );
    let score = submission.score;
    let rank = state.store.add_score(submission).await?;
    Ok(Json(ScoreResponse {
        success: true,
        score,
        rank,
    }))
}

pub async fn leaderboard(
    State(state): State<ApiState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    Ok(Json(state.store.top_scores().await?))
}

pub async fn player_best(
    State(state): State<ApiState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerBestResponse>, ApiError> {
    let player_id = PlayerId::new(player_id);
    let best_score = state.store.player_best_score(&player_id).await?;
    Ok(Json(PlayerBestResponse {
        player_id,
        best_score,
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("API endpoint not found")
}
