use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{AdaptiveContentRequest, AdaptiveContentResponse, ApiError, Json};
use crate::domain::AdaptiveOutcome;

/// POST /api/adaptive-content
pub async fn adaptive_content(
    State(state): State<AppState>,
    Json(request): Json<AdaptiveContentRequest>,
) -> Result<Json<AdaptiveContentResponse>, ApiError> {
    let request = request.into_request()?;

    let response = match state.tutor.adaptive_content(&request).await? {
        AdaptiveOutcome::Blocked(blocked) => AdaptiveContentResponse::blocked(blocked),
        AdaptiveOutcome::Content {
            chunks,
            content_types,
            advisory,
        } => AdaptiveContentResponse::content(chunks, content_types, advisory),
    };

    Ok(Json(response))
}
