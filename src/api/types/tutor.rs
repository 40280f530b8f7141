//! Request and response bodies for the tutoring endpoints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::curriculum::{LearnerState, TopicConfig};
use crate::domain::retrieval::{ChunkSummary, ContentMetadata, RetrievalFilter, ScoredChunk};
use crate::domain::tutor::{AdaptiveRequest, BlockedTopic, TutorOutcome, TutorQuestion};
use crate::domain::{Board, DomainError, Language, RetrievalState};

const DEFAULT_GRADE: u32 = 9;
const DEFAULT_MASTERY: f64 = 0.5;

/// Body shared by `/api/chat` and `/api/lesson`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub board: Option<String>,
    #[serde(default)]
    pub grade: Option<u32>,
    #[serde(default)]
    pub subtopic: Option<String>,
    #[serde(default)]
    pub method_preference: Option<String>,
    #[serde(default)]
    pub exclude_methods: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl TutorRequest {
    /// Chat requires a message
    pub fn into_question(self) -> Result<TutorQuestion, DomainError> {
        self.validate(true, |_, _, _| String::new())
    }

    /// Lesson falls back to `default_message` when no message was sent
    pub fn into_lesson_question(
        self,
        default_message: impl FnOnce(&str, u32, &Board) -> String,
    ) -> Result<TutorQuestion, DomainError> {
        self.validate(false, default_message)
    }

    fn validate(
        self,
        message_required: bool,
        default_message: impl FnOnce(&str, u32, &Board) -> String,
    ) -> Result<TutorQuestion, DomainError> {
        let message = present(self.message);
        let topic = present(self.topic);
        let board = present(self.board);

        let mut missing = Vec::new();
        if message_required && message.is_none() {
            missing.push("message".to_string());
        }
        if topic.is_none() {
            missing.push("topic".to_string());
        }
        if board.is_none() {
            missing.push("board".to_string());
        }
        if self.grade.is_none() {
            missing.push("grade".to_string());
        }

        let (Some(topic), Some(board), Some(grade)) = (topic, board, self.grade) else {
            return Err(DomainError::missing_fields(missing));
        };
        if !missing.is_empty() {
            return Err(DomainError::missing_fields(missing));
        }

        let board = Board::from(board);
        let message = message.unwrap_or_else(|| default_message(&topic, grade, &board));
        let language = present(self.language).map(Language::from).unwrap_or_default();

        let mut question = TutorQuestion::new(message, topic, grade, board)
            .with_language(language)
            .with_exclude_methods(self.exclude_methods);
        if let Some(subtopic) = self.subtopic {
            question = question.with_subtopic(subtopic);
        }
        if let Some(method) = self.method_preference {
            question = question.with_method_preference(method);
        }

        Ok(question)
    }
}

/// Answer body for chat and lesson
#[derive(Debug, Clone, Serialize)]
pub struct TutorResponse {
    pub answer: String,
    pub grade_appropriate: bool,
    pub state: RetrievalState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_grade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_grade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_metadata: Option<Vec<ChunkSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_applied: Option<RetrievalFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relaxed_filter_used: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl TutorResponse {
    pub fn from_outcome(topic: &str, outcome: TutorOutcome) -> Self {
        let state = outcome.state();
        let mut response = Self {
            answer: String::new(),
            grade_appropriate: true,
            state,
            grade_message: None,
            recommended_grade: None,
            current_grade: None,
            content_metadata: None,
            filter_applied: None,
            relaxed_filter_used: None,
            topic: None,
            results_count: None,
            suggestions: None,
            chapter: None,
            subject: None,
        };

        match outcome {
            TutorOutcome::Blocked(blocked) => {
                response.answer = blocked.answer;
                response.grade_appropriate = false;
                response.recommended_grade = Some(blocked.min_grade);
                response.current_grade = Some(blocked.current_grade);
            }
            TutorOutcome::Answered(answered) => {
                response.content_metadata = Some(answered.summaries());
                response.results_count = Some(answered.chunks.len());
                response.answer = answered.answer;
                response.grade_message = answered.advisory;
                response.filter_applied = Some(answered.filter_applied);
                response.relaxed_filter_used = Some(answered.relaxed_filter_used);
                response.topic = Some(topic.to_string());
            }
            TutorOutcome::NoResults(empty) => {
                response.answer = empty.answer;
                response.grade_message = empty.advisory;
                response.filter_applied = Some(empty.filter_applied);
                response.suggestions = Some(empty.suggestions);
                response.topic = Some(topic.to_string());
            }
        }

        response
    }

    pub fn with_chapter(mut self, chapter: &str, subject: &str) -> Self {
        self.chapter = Some(chapter.to_string());
        self.subject = Some(subject.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdaptiveContentRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub grade: Option<u32>,
    #[serde(default)]
    pub board: Option<String>,
    #[serde(default)]
    pub subtopic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl AdaptiveContentRequest {
    /// Grade defaults to 9 and board to CBSE
    pub fn into_request(self) -> Result<AdaptiveRequest, DomainError> {
        let topic = present(self.topic).ok_or_else(|| DomainError::missing_fields(vec!["topic".to_string()]))?;

        Ok(AdaptiveRequest {
            topic,
            grade: self.grade.unwrap_or(DEFAULT_GRADE),
            board: present(self.board).map(Board::from).unwrap_or(Board::Cbse),
            language: present(self.language).map(Language::from).unwrap_or_default(),
            subtopic: present(self.subtopic),
        })
    }
}

/// A practice item: the chunk's metadata plus its id and score
#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveItem {
    pub id: String,
    pub score: f32,
    #[serde(flatten)]
    pub metadata: ContentMetadata,
}

impl From<ScoredChunk> for AdaptiveItem {
    fn from(chunk: ScoredChunk) -> Self {
        Self {
            id: chunk.id,
            score: chunk.score,
            metadata: chunk.metadata,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveContentResponse {
    pub adaptive_content: Vec<AdaptiveItem>,
    pub grade_appropriate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AdaptiveContentResponse {
    pub fn blocked(blocked: BlockedTopic) -> Self {
        Self {
            adaptive_content: Vec::new(),
            grade_appropriate: false,
            content_types: None,
            grade_message: None,
            message: Some(blocked.advisory),
        }
    }

    pub fn content(
        chunks: Vec<ScoredChunk>,
        content_types: Vec<String>,
        advisory: Option<String>,
    ) -> Self {
        Self {
            adaptive_content: chunks.into_iter().map(AdaptiveItem::from).collect(),
            grade_appropriate: true,
            content_types: Some(content_types),
            grade_message: advisory,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LearningPathRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub grade: Option<u32>,
    #[serde(default)]
    pub board: Option<String>,
    #[serde(default)]
    pub current_subtopic: Option<String>,
    #[serde(default)]
    pub mastery_level: Option<f64>,
}

impl LearningPathRequest {
    /// Topic and board are required; grade defaults to 9 and mastery to 0.5
    pub fn into_learner(self) -> Result<(String, LearnerState), DomainError> {
        let topic = present(self.topic);
        let board = present(self.board);

        let (Some(topic), Some(board)) = (topic.clone(), board.clone()) else {
            let mut missing = Vec::new();
            if topic.is_none() {
                missing.push("topic".to_string());
            }
            if board.is_none() {
                missing.push("board".to_string());
            }
            return Err(DomainError::missing_fields(missing));
        };

        let mastery_level = self.mastery_level.unwrap_or(DEFAULT_MASTERY);
        if !(0.0..=1.0).contains(&mastery_level) {
            return Err(DomainError::validation(format!(
                "mastery_level must be between 0 and 1, got {}",
                mastery_level
            )));
        }

        Ok((
            topic,
            LearnerState {
                grade: self.grade.unwrap_or(DEFAULT_GRADE),
                board: Board::from(board),
                current_subtopic: present(self.current_subtopic),
                mastery_level,
            },
        ))
    }
}

/// Grade-gated learning path reply
#[derive(Debug, Clone, Serialize)]
pub struct BlockedPathResponse {
    pub grade_appropriate: bool,
    pub message: String,
    pub recommended_grade: u32,
    pub current_grade: u32,
}

impl From<BlockedTopic> for BlockedPathResponse {
    fn from(blocked: BlockedTopic) -> Self {
        Self {
            grade_appropriate: false,
            message: blocked.advisory,
            recommended_grade: blocked.min_grade,
            current_grade: blocked.current_grade,
        }
    }
}

/// One entry of `GET /api/topics`
#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub name: String,
    pub subject: String,
    pub chapter: String,
    pub index: String,
    pub namespace: String,
    pub subtopics: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_grade: Option<u32>,
    pub grades: Vec<u32>,
    pub boards: Vec<String>,
    pub languages: Vec<String>,
}

impl From<&TopicConfig> for TopicSummary {
    fn from(topic: &TopicConfig) -> Self {
        Self {
            name: topic.name.clone(),
            subject: topic.subject.clone(),
            chapter: topic.chapter.clone(),
            index: topic.index.clone(),
            namespace: topic.namespace.clone(),
            subtopics: topic
                .subtopics
                .iter()
                .map(|(id, sub)| (id.clone(), sub.name.clone()))
                .collect(),
            min_grade: topic.grade_policy.as_ref().map(|p| p.min_grade),
            grades: (3..=12).collect(),
            boards: Board::KNOWN.iter().map(|b| b.as_str().to_string()).collect(),
            languages: Language::KNOWN.iter().map(|l| l.as_str().to_string()).collect(),
        }
    }
}

/// Trimmed, non-empty value
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
