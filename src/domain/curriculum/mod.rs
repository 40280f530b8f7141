//! Curriculum catalogue: grade policies, boards, progressions and suggestions

mod catalog;
mod level;
mod policy;
mod progression;
mod suggestions;

pub use catalog::{Curriculum, SubtopicConfig, TopicConfig};
pub use level::{Board, GradeLevel, Language};
pub use policy::{GateDecision, TopicGradePolicy, ADVANCED_TOPIC_ADVISORY};
pub use progression::{
    LearnerState, LearningPath, NextStep, Progression, StepFocus, PROGRESSION_THRESHOLD,
    REMEDIATION_THRESHOLD,
};
pub use suggestions::{LevelSuggestions, SuggestionTable};
