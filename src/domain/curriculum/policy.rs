//! Grade gating policy

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const ADVANCED_TOPIC_ADVISORY: &str = "This is an advanced topic for your grade level.";

/// Grades at which a topic may be taught
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGradePolicy {
    /// Lowest grade that may receive content for the topic
    pub min_grade: u32,
    /// Grades the topic is normally taught in
    pub optimal_grades: BTreeSet<u32>,
    /// Grade where boards first introduce the topic
    pub early_introduction_grade: u32,
}

impl TopicGradePolicy {
    pub fn new(min_grade: u32, optimal_grades: impl IntoIterator<Item = u32>) -> Self {
        Self {
            min_grade,
            optimal_grades: optimal_grades.into_iter().collect(),
            early_introduction_grade: min_grade,
        }
    }

    pub fn evaluate(&self, grade: u32) -> GateDecision {
        if grade < self.min_grade {
            GateDecision::Blocked {
                min_grade: self.min_grade,
                advisory: blocked_advisory(self.min_grade),
            }
        } else if self.optimal_grades.contains(&grade) {
            GateDecision::Optimal
        } else {
            GateDecision::Advanced {
                advisory: ADVANCED_TOPIC_ADVISORY.to_string(),
            }
        }
    }
}

/// Outcome of checking a topic against a student's grade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Topic has no policy entry
    Unrestricted,
    /// Grade is one of the topic's optimal grades
    Optimal,
    /// Grade is at or above the minimum but outside the optimal set
    Advanced { advisory: String },
    /// Grade is below the minimum; retrieval must not run
    Blocked { min_grade: u32, advisory: String },
}

impl GateDecision {
    pub fn allowed(&self) -> bool {
        !matches!(self, Self::Blocked { .. })
    }

    pub fn advisory(&self) -> Option<&str> {
        match self {
            Self::Unrestricted | Self::Optimal => None,
            Self::Advanced { advisory } | Self::Blocked { advisory, .. } => Some(advisory),
        }
    }

    /// `(allowed, advisory)` pair
    pub fn into_parts(self) -> (bool, Option<String>) {
        match self {
            Self::Unrestricted | Self::Optimal => (true, None),
            Self::Advanced { advisory } => (true, Some(advisory)),
            Self::Blocked { advisory, .. } => (false, Some(advisory)),
        }
    }
}

fn blocked_advisory(min_grade: u32) -> String {
    format!(
        "This topic is typically taught in grade {} and above.",
        min_grade
    )
}
