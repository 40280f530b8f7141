//! Curriculum catalogue loaded at startup

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::level::Board;
use super::policy::{GateDecision, TopicGradePolicy};
use super::progression::{LearnerState, LearningPath, Progression};
use super::suggestions::SuggestionTable;
use crate::domain::DomainError;

const BUILTIN_CURRICULUM: &str = include_str!("../../../config/curriculum.toml");

const DEFAULT_CHAPTER: &str = "General Knowledge";
const DEFAULT_SUBJECT: &str = "Science";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicConfig {
    pub name: String,
    #[serde(default)]
    pub sub_methods: Vec<String>,
}

/// Everything the service knows about a single topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub name: String,
    pub subject: String,
    pub chapter: String,
    /// Vector index holding the topic's content
    pub index: String,
    pub namespace: String,
    #[serde(default)]
    pub grade_policy: Option<TopicGradePolicy>,
    #[serde(default)]
    pub subtopics: BTreeMap<String, SubtopicConfig>,
    #[serde(default)]
    pub progression: Option<Progression>,
    #[serde(default)]
    pub suggestions: SuggestionTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    #[serde(default)]
    topics: BTreeMap<String, TopicConfig>,
}

impl Curriculum {
    pub fn new(topics: BTreeMap<String, TopicConfig>) -> Result<Self, DomainError> {
        let curriculum = Self { topics };
        curriculum.validate()?;
        Ok(curriculum)
    }

    /// The catalogue bundled with the binary
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_toml_str(BUILTIN_CURRICULUM)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DomainError> {
        let curriculum: Self = toml::from_str(content).map_err(|e| {
            DomainError::configuration(format!("Invalid curriculum document: {}", e))
        })?;
        curriculum.validate()?;
        Ok(curriculum)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read curriculum file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), DomainError> {
        for (id, topic) in &self.topics {
            if topic.index.trim().is_empty() || topic.namespace.trim().is_empty() {
                return Err(DomainError::configuration(format!(
                    "Topic '{}' must name an index and a namespace",
                    id
                )));
            }

            if let Some(policy) = &topic.grade_policy {
                if let Some(grade) = policy
                    .optimal_grades
                    .iter()
                    .find(|grade| **grade < policy.min_grade)
                {
                    return Err(DomainError::configuration(format!(
                        "Topic '{}' lists optimal grade {} below its minimum grade {}",
                        id, grade, policy.min_grade
                    )));
                }
            }

            if let Some(progression) = &topic.progression {
                if let Some(unknown) = progression
                    .sequence
                    .iter()
                    .find(|s| !topic.subtopics.contains_key(s.as_str()))
                {
                    return Err(DomainError::configuration(format!(
                        "Topic '{}' progression references unknown subtopic '{}'",
                        id, unknown
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn topic(&self, id: &str) -> Option<&TopicConfig> {
        self.topics.get(id)
    }

    pub fn topics(&self) -> impl Iterator<Item = (&str, &TopicConfig)> {
        self.topics.iter().map(|(id, topic)| (id.as_str(), topic))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Grade gate for a topic. Topics without a policy, including unknown
    /// ones, are unrestricted.
    pub fn gate(&self, topic: &str, grade: u32) -> GateDecision {
        self.topic(topic)
            .and_then(|t| t.grade_policy.as_ref())
            .map(|policy| policy.evaluate(grade))
            .unwrap_or(GateDecision::Unrestricted)
    }

    /// `(allowed, advisory)` form of [`Curriculum::gate`]
    pub fn is_topic_appropriate(&self, topic: &str, grade: u32) -> (bool, Option<String>) {
        self.gate(topic, grade).into_parts()
    }

    pub fn suggestions(
        &self,
        topic: &str,
        subtopic: Option<&str>,
        grade: u32,
        board: &Board,
    ) -> Vec<String> {
        self.topic(topic)
            .map(|t| t.suggestions.render(subtopic, grade, board))
            .unwrap_or_default()
    }

    pub fn chapter_and_subject(&self, topic: &str) -> (&str, &str) {
        self.topic(topic)
            .map(|t| (t.chapter.as_str(), t.subject.as_str()))
            .unwrap_or((DEFAULT_CHAPTER, DEFAULT_SUBJECT))
    }

    pub fn learning_path(
        &self,
        topic: &str,
        learner: &LearnerState,
    ) -> Result<LearningPath, DomainError> {
        self.topic(topic)
            .and_then(|t| t.progression.as_ref())
            .and_then(|progression| progression.plan(learner))
            .ok_or_else(|| {
                DomainError::not_found(format!("No learning progression for topic '{}'", topic))
            })
    }
}
