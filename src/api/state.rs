//! Application state shared by every handler

use std::sync::Arc;

use crate::domain::Curriculum;
use crate::infrastructure::services::TutorService;

/// Immutable context built once at startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub tutor: Arc<TutorService>,
}

impl AppState {
    pub fn new(tutor: TutorService) -> Self {
        Self {
            tutor: Arc::new(tutor),
        }
    }

    pub fn curriculum(&self) -> &Curriculum {
        self.tutor.curriculum()
    }
}
