//! Results of a tutoring request

use serde::Serialize;

use crate::domain::curriculum::Board;
use crate::domain::retrieval::{ChunkSummary, RetrievalFilter, ScoredChunk};

pub const NO_RESULTS_ANSWER: &str =
    "I couldn't find relevant content for your query with the specified filters.";

/// States of the retrieval protocol.
///
/// `GateCheck -> Blocked | StrictSearch`, `StrictSearch -> Answered | RelaxedSearch`,
/// `RelaxedSearch -> Answered | NoResults`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetrievalState {
    GateCheck,
    Blocked,
    StrictSearch,
    RelaxedSearch,
    Answered,
    NoResults,
}

impl RetrievalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GateCheck => "GATE_CHECK",
            Self::Blocked => "BLOCKED",
            Self::StrictSearch => "STRICT_SEARCH",
            Self::RelaxedSearch => "RELAXED_SEARCH",
            Self::Answered => "ANSWERED",
            Self::NoResults => "NO_RESULTS",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Blocked | Self::Answered | Self::NoResults)
    }
}

impl std::fmt::Display for RetrievalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade below the topic's minimum; nothing was retrieved
#[derive(Debug, Clone, PartialEq)]
pub struct BlockedTopic {
    pub min_grade: u32,
    pub current_grade: u32,
    pub advisory: String,
    /// Friendly redirect shown to the student
    pub answer: String,
}

impl BlockedTopic {
    pub fn new(topic: &str, min_grade: u32, current_grade: u32, advisory: String) -> Self {
        Self {
            min_grade,
            current_grade,
            advisory,
            answer: redirect_message(topic, min_grade, current_grade),
        }
    }
}

/// Content was found and an answer composed
#[derive(Debug, Clone, PartialEq)]
pub struct TutorAnswer {
    pub answer: String,
    pub advisory: Option<String>,
    /// The filter whose search produced the chunks
    pub filter_applied: RetrievalFilter,
    pub relaxed_filter_used: bool,
    pub chunks: Vec<ScoredChunk>,
}

impl TutorAnswer {
    pub fn summaries(&self) -> Vec<ChunkSummary> {
        self.chunks.iter().map(ChunkSummary::from).collect()
    }
}

/// Both searches came back empty
#[derive(Debug, Clone, PartialEq)]
pub struct NoContent {
    pub answer: String,
    pub advisory: Option<String>,
    /// The strict filter the request started from
    pub filter_applied: RetrievalFilter,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TutorOutcome {
    Blocked(BlockedTopic),
    Answered(TutorAnswer),
    NoResults(NoContent),
}

impl TutorOutcome {
    /// Terminal state the request ended in
    pub fn state(&self) -> RetrievalState {
        match self {
            Self::Blocked(_) => RetrievalState::Blocked,
            Self::Answered(_) => RetrievalState::Answered,
            Self::NoResults(_) => RetrievalState::NoResults,
        }
    }

    pub fn answer(&self) -> &str {
        match self {
            Self::Blocked(blocked) => &blocked.answer,
            Self::Answered(answered) => &answered.answer,
            Self::NoResults(empty) => &empty.answer,
        }
    }
}

/// Selection of practice content for a student
#[derive(Debug, Clone, PartialEq)]
pub enum AdaptiveOutcome {
    Blocked(BlockedTopic),
    Content {
        chunks: Vec<ScoredChunk>,
        content_types: Vec<String>,
        advisory: Option<String>,
    },
}

/// `quadratic_equations` -> `Quadratic Equations`
pub fn topic_display_name(topic: &str) -> String {
    topic
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn redirect_message(topic: &str, min_grade: u32, current_grade: u32) -> String {
    let name = topic_display_name(topic);
    format!(
        "I understand you're curious about {name}! 🌟\n\n\
         However, {name} is typically taught in higher grades (usually starting from grade {min_grade}).\n\n\
         Right now, you're in grade {current_grade}, so it's perfectly normal that this topic hasn't been covered yet. \
         Your teachers will introduce you to {name} when you're ready for it in the coming years.\n\n\
         Keep being curious about learning - that's wonderful! For now, you might want to focus on the topics \
         that are part of your current grade curriculum. Is there anything else from your current studies \
         that I can help you with?"
    )
}

/// Answer used when the model returns no text
pub fn fallback_answer(topic: &str, grade: u32, board: &Board, message: &str) -> String {
    format!(
        "I found some information about {} for Grade {} {}, but let me provide a general explanation based on your question about: {}",
        topic, grade, board, message
    )
}
