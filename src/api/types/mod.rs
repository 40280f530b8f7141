//! HTTP request and response types

pub mod error;
pub mod json;
pub mod tutor;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use tutor::{
    AdaptiveContentRequest, AdaptiveContentResponse, BlockedPathResponse, LearningPathRequest,
    TopicSummary, TutorRequest, TutorResponse,
};
