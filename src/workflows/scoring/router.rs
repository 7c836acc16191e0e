use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::repository::{RosterRepository, ScoreRepository};
use super::service::{MatchScoringService, ScoreMatchRequest, ScoringServiceError};

/// Router builder exposing the scoring entry point and summary reads.
pub fn scoring_router<R, S>(service: Arc<MatchScoringService<R, S>>) -> Router
where
    R: RosterRepository + 'static,
    S: ScoreRepository + 'static,
{
    Router::new()
        .route("/api/v1/matches/score", post(score_handler::<R, S>))
        .route(
            "/api/v1/classes/:class_code/players/:player_ref/summary",
            get(summary_handler::<R, S>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler<R, S>(
    State(service): State<Arc<MatchScoringService<R, S>>>,
    axum::Json(request): axum::Json<ScoreMatchRequest>,
) -> Response
where
    R: RosterRepository + 'static,
    S: ScoreRepository + 'static,
{
    match service.process(&request) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<R, S>(
    State(service): State<Arc<MatchScoringService<R, S>>>,
    Path((class_code, player_ref)): Path<(String, String)>,
) -> Response
where
    R: RosterRepository + 'static,
    S: ScoreRepository + 'static,
{
    match service.summary(&player_ref, &class_code) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScoringServiceError) -> Response {
    let status = match &error {
        ScoringServiceError::PlayerNotFound(_)
        | ScoringServiceError::ClassroomNotFound(_)
        | ScoringServiceError::AttemptNotFound { .. }
        | ScoringServiceError::SummaryNotFound { .. } => StatusCode::NOT_FOUND,
        ScoringServiceError::Format(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoringServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
