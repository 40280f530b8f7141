//! Alternative questions offered when no content matches

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::level::{Board, GradeLevel};
use crate::domain::prompt::{render_template, TemplateValues};

const GENERAL_KEY: &str = "general";

/// Suggestion templates for one subtopic, by grade level
pub type LevelSuggestions = BTreeMap<String, Vec<String>>;

/// Suggestion templates keyed by subtopic, with `general` as the fallback entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionTable(BTreeMap<String, LevelSuggestions>);

impl SuggestionTable {
    pub fn new(entries: BTreeMap<String, LevelSuggestions>) -> Self {
        Self(entries)
    }

    /// Templates for a subtopic and level.
    ///
    /// A known subtopic without templates for the level falls back to the
    /// `general` entry for that level; an unknown subtopic uses `general`.
    pub fn templates(&self, subtopic: Option<&str>, level: GradeLevel) -> &[String] {
        let general = self
            .0
            .get(GENERAL_KEY)
            .and_then(|levels| levels.get(level.as_str()))
            .map(Vec::as_slice)
            .unwrap_or_default();

        match subtopic.and_then(|s| self.0.get(s)) {
            Some(levels) => levels
                .get(level.as_str())
                .map(Vec::as_slice)
                .unwrap_or(general),
            None => general,
        }
    }

    /// Rendered suggestions for a student
    pub fn render(&self, subtopic: Option<&str>, grade: u32, board: &Board) -> Vec<String> {
        let level = GradeLevel::from_grade(grade);
        let values: TemplateValues = [
            ("grade", grade.to_string()),
            ("board", board.as_str().to_string()),
        ]
        .into_iter()
        .collect();

        self.templates(subtopic, level)
            .iter()
            .map(|template| {
                render_template(template, &values).unwrap_or_else(|_| template.clone())
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
