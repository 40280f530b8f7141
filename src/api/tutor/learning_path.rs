use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::api::types::{ApiError, BlockedPathResponse, Json, LearningPathRequest};

/// POST /api/learning-path
pub async fn learning_path(
    State(state): State<AppState>,
    Json(request): Json<LearningPathRequest>,
) -> Result<Response, ApiError> {
    let (topic, learner) = request.into_learner()?;

    Ok(match state.tutor.learning_path(&topic, &learner)? {
        Ok(path) => Json(path).into_response(),
        Err(blocked) => Json(BlockedPathResponse::from(blocked)).into_response(),
    })
}
