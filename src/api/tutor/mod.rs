//! Tutoring endpoints under `/api`

pub mod adaptive;
pub mod chat;
pub mod learning_path;
pub mod topics;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_tutor_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/lesson", post(chat::lesson))
        .route("/adaptive-content", post(adaptive::adaptive_content))
        .route("/learning-path", post(learning_path::learning_path))
        .route("/topics", get(topics::list_topics))
}
