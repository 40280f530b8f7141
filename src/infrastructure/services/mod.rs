//! Application services

mod tutor_service;

pub use tutor_service::{default_lesson_message, TutorService, TutorServiceConfig, TutorServiceDeps};
