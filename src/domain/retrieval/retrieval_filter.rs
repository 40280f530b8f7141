//! Grade/board aware retrieval filter and its single-step relaxation

use serde::Serialize;

use super::filter::{FilterBuilder, FilterValue, MetadataFilter};
use crate::domain::curriculum::{Board, Language};

pub const GRADE_KEY: &str = "grade";
pub const BOARD_KEY: &str = "board";
pub const LANGUAGE_KEY: &str = "language";
pub const SUBTOPIC_KEY: &str = "subtopic";
pub const METHOD_TAGS_KEY: &str = "method_tags";

/// Per-request constraints on which chunks may be retrieved.
///
/// `language`, `subtopic` and `method_preference` are `None` only on a relaxed
/// filter or when the caller left them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievalFilter {
    pub grade: u32,
    pub board: Board,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_preference: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl RetrievalFilter {
    /// Strict filter. Board and language are passed through unvalidated.
    pub fn build(
        grade: u32,
        board: Board,
        language: Language,
        subtopic: Option<&str>,
        method_preference: Option<&str>,
    ) -> Self {
        Self {
            grade,
            board,
            language: Some(language),
            subtopic: non_empty(subtopic),
            method_preference: non_empty(method_preference),
        }
    }

    /// Grade and board only
    pub fn relaxed(&self) -> Self {
        Self {
            grade: self.grade,
            board: self.board.clone(),
            language: None,
            subtopic: None,
            method_preference: None,
        }
    }

    pub fn is_relaxed(&self) -> bool {
        self.language.is_none() && self.subtopic.is_none() && self.method_preference.is_none()
    }

    /// Metadata keys this filter constrains
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = vec![GRADE_KEY, BOARD_KEY];
        if self.language.is_some() {
            keys.push(LANGUAGE_KEY);
        }
        if self.subtopic.is_some() {
            keys.push(SUBTOPIC_KEY);
        }
        if self.method_preference.is_some() {
            keys.push(METHOD_TAGS_KEY);
        }
        keys
    }

    pub fn to_metadata_filter(&self) -> MetadataFilter {
        let mut builder = FilterBuilder::new()
            .eq(GRADE_KEY, self.grade)
            .eq(BOARD_KEY, self.board.as_str());

        if let Some(language) = &self.language {
            builder = builder.eq(LANGUAGE_KEY, language.as_str());
        }
        if let Some(subtopic) = &self.subtopic {
            builder = builder.eq(SUBTOPIC_KEY, subtopic.as_str());
        }
        if let Some(method) = &self.method_preference {
            builder = builder.in_list(METHOD_TAGS_KEY, vec![FilterValue::from(method.as_str())]);
        }

        builder.build()
    }
}
