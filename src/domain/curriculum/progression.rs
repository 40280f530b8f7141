//! Subtopic sequencing and next-step recommendations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::level::Board;

/// Mastery at or above which a student moves on to the next subtopic
pub const PROGRESSION_THRESHOLD: f64 = 0.7;
/// Mastery below which prerequisites are recommended for review
pub const REMEDIATION_THRESHOLD: f64 = 0.4;

/// Ordered subtopics of a topic and what each one builds on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub sequence: Vec<String>,
    #[serde(default)]
    pub prerequisites: BTreeMap<String, Vec<String>>,
}

/// Student position used to plan the next step
#[derive(Debug, Clone)]
pub struct LearnerState {
    pub grade: u32,
    pub board: Board,
    pub current_subtopic: Option<String>,
    pub mastery_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepFocus {
    PracticeProblems,
    Introduction,
    AdvancedProblems,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextStep {
    pub subtopic: String,
    pub focus: StepFocus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_adjustment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisites_to_review: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPath {
    pub current_subtopic: String,
    pub current_grade: u32,
    pub board: Board,
    pub mastery_level: f64,
    pub recommendation: String,
    pub next_steps: Vec<NextStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<Vec<String>>,
}

impl Progression {
    pub fn prerequisites_of(&self, subtopic: &str) -> &[String] {
        self.prerequisites
            .get(subtopic)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Plan the next step for a learner. Returns `None` when the sequence is empty.
    pub fn plan(&self, learner: &LearnerState) -> Option<LearningPath> {
        let first = self.sequence.first()?;
        let requested = learner
            .current_subtopic
            .as_deref()
            .filter(|s| !s.is_empty());

        // Subtopics outside the sequence are reported as-is but plan from the start
        let current = requested.unwrap_or(first).to_string();
        let position = requested
            .and_then(|s| self.sequence.iter().position(|item| item == s))
            .unwrap_or(0);

        let (recommendation, step) = if learner.mastery_level < PROGRESSION_THRESHOLD {
            (
                "Continue practicing current topic".to_string(),
                NextStep {
                    subtopic: current.clone(),
                    focus: StepFocus::PracticeProblems,
                    difficulty_adjustment: Some(-0.5),
                    prerequisites_to_review: None,
                },
            )
        } else if let Some(next) = self.sequence.get(position + 1) {
            (
                format!("Progress to {}", next),
                NextStep {
                    subtopic: next.clone(),
                    focus: StepFocus::Introduction,
                    difficulty_adjustment: None,
                    prerequisites_to_review: Some(self.prerequisites_of(next).to_vec()),
                },
            )
        } else {
            (
                "Explore advanced applications".to_string(),
                NextStep {
                    subtopic: "applications".to_string(),
                    focus: StepFocus::AdvancedProblems,
                    difficulty_adjustment: Some(0.5),
                    prerequisites_to_review: None,
                },
            )
        };

        let remediation = if learner.mastery_level < REMEDIATION_THRESHOLD {
            requested
                .map(|s| self.prerequisites_of(s))
                .filter(|prereqs| !prereqs.is_empty())
                .map(<[String]>::to_vec)
        } else {
            None
        };

        Some(LearningPath {
            current_subtopic: current,
            current_grade: learner.grade,
            board: learner.board.clone(),
            mastery_level: learner.mastery_level,
            recommendation,
            next_steps: vec![step],
            remediation,
        })
    }
}
