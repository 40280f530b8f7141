use crate::domain::curriculum::{Board, Language};
use crate::domain::retrieval::RetrievalFilter;

/// A validated student question
#[derive(Debug, Clone, PartialEq)]
pub struct TutorQuestion {
    pub message: String,
    pub topic: String,
    pub grade: u32,
    pub board: Board,
    pub language: Language,
    pub subtopic: Option<String>,
    pub method_preference: Option<String>,
    /// Methods the answer should avoid; only affects the prompt
    pub exclude_methods: Vec<String>,
}

impl TutorQuestion {
    pub fn new(
        message: impl Into<String>,
        topic: impl Into<String>,
        grade: u32,
        board: Board,
    ) -> Self {
        Self {
            message: message.into(),
            topic: topic.into(),
            grade,
            board,
            language: Language::default(),
            subtopic: None,
            method_preference: None,
            exclude_methods: Vec::new(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_subtopic(mut self, subtopic: impl Into<String>) -> Self {
        self.subtopic = Some(subtopic.into());
        self
    }

    pub fn with_method_preference(mut self, method: impl Into<String>) -> Self {
        self.method_preference = Some(method.into());
        self
    }

    pub fn with_exclude_methods(mut self, methods: Vec<String>) -> Self {
        self.exclude_methods = methods;
        self
    }

    pub fn strict_filter(&self) -> RetrievalFilter {
        RetrievalFilter::build(
            self.grade,
            self.board.clone(),
            self.language.clone(),
            self.subtopic.as_deref(),
            self.method_preference.as_deref(),
        )
    }
}

/// Request for graded practice content
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveRequest {
    pub topic: String,
    pub grade: u32,
    pub board: Board,
    pub language: Language,
    pub subtopic: Option<String>,
}

impl AdaptiveRequest {
    /// Strict filter without a method preference
    pub fn filter(&self) -> RetrievalFilter {
        RetrievalFilter::build(
            self.grade,
            self.board.clone(),
            self.language.clone(),
            self.subtopic.as_deref(),
            None,
        )
    }

    pub fn query(&self) -> String {
        format!("Practice problems for {} at difficulty level 3", self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_filter_from_question() {
        let question = TutorQuestion::new("How?", "quadratic_equations", 10, Board::Cbse)
            .with_subtopic("factorization_method")
            .with_method_preference("")
            .with_language(Language::Hindi);

        let filter = question.strict_filter();
        assert_eq!(filter.subtopic.as_deref(), Some("factorization_method"));
        assert!(filter.method_preference.is_none());
        assert_eq!(filter.language, Some(Language::Hindi));
    }

    #[test]
    fn test_adaptive_filter_has_no_method() {
        let request = AdaptiveRequest {
            topic: "digestive_system".to_string(),
            grade: 7,
            board: Board::Ssc,
            language: Language::English,
            subtopic: Some("digestion_process".to_string()),
        };

        assert_eq!(
            request.filter().keys(),
            vec!["grade", "board", "language", "subtopic"]
        );
        assert_eq!(
            request.query(),
            "Practice problems for digestive_system at difficulty level 3"
        );
    }
}
