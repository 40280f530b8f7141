//! Question answering and lessons

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, TutorRequest, TutorResponse};
use crate::infrastructure::services::default_lesson_message;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<TutorRequest>,
) -> Result<Json<TutorResponse>, ApiError> {
    let question = request.into_question()?;
    let outcome = state.tutor.answer(&question).await?;

    info!(topic = %question.topic, state = %outcome.state(), "Chat answered");
    Ok(Json(TutorResponse::from_outcome(&question.topic, outcome)))
}

/// POST /api/lesson
pub async fn lesson(
    State(state): State<AppState>,
    Json(request): Json<TutorRequest>,
) -> Result<Json<TutorResponse>, ApiError> {
    let question = request.into_lesson_question(default_lesson_message)?;
    let outcome = state.tutor.answer(&question).await?;
    let (chapter, subject) = state.curriculum().chapter_and_subject(&question.topic);

    info!(topic = %question.topic, state = %outcome.state(), "Lesson generated");
    Ok(Json(
        TutorResponse::from_outcome(&question.topic, outcome).with_chapter(chapter, subject),
    ))
}
