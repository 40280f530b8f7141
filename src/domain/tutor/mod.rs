//! Tutoring requests and their outcomes

mod outcome;
mod question;

pub use outcome::{
    fallback_answer, topic_display_name, AdaptiveOutcome, BlockedTopic, NoContent,
    RetrievalState, TutorAnswer, TutorOutcome, NO_RESULTS_ANSWER,
};
pub use question::{AdaptiveRequest, TutorQuestion};
