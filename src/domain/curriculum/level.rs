//! Boards, instruction languages and grade bands

use std::fmt;

use serde::{Deserialize, Serialize};

/// Curriculum authority that determines syllabus sequencing.
///
/// Unrecognised values are kept verbatim in [`Board::Other`] so they reach the
/// vector store unchanged and simply match nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Board {
    Cbse,
    Icse,
    Ssc,
    Other(String),
}

impl Board {
    pub const KNOWN: [Board; 3] = [Board::Cbse, Board::Icse, Board::Ssc];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cbse => "CBSE",
            Self::Icse => "ICSE",
            Self::Ssc => "SSC",
            Self::Other(value) => value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Board {
    fn from(value: &str) -> Self {
        match value {
            "CBSE" => Self::Cbse,
            "ICSE" => Self::Icse,
            "SSC" => Self::Ssc,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Board {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.as_str().to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language the curriculum content is written in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    English,
    Hindi,
    Marathi,
    Other(String),
}

impl Language {
    pub const KNOWN: [Language; 3] = [Language::English, Language::Hindi, Language::Marathi];

    pub fn as_str(&self) -> &str {
        match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Marathi => "marathi",
            Self::Other(value) => value,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        match value {
            "english" => Self::English,
            "hindi" => Self::Hindi,
            "marathi" => Self::Marathi,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.as_str().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// School stage derived from a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    Elementary,
    MiddleSchool,
    HighSchool,
}

impl GradeLevel {
    pub fn from_grade(grade: u32) -> Self {
        match grade {
            0..=5 => Self::Elementary,
            6..=8 => Self::MiddleSchool,
            _ => Self::HighSchool,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::MiddleSchool => "middle_school",
            Self::HighSchool => "high_school",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_parsing_is_fail_soft() {
        assert_eq!(Board::from("CBSE"), Board::Cbse);
        assert_eq!(Board::from("SSC"), Board::Ssc);
        assert_eq!(Board::from("IB"), Board::Other("IB".to_string()));
        assert_eq!(Board::from("IB").as_str(), "IB");
        assert!(!Board::from("cbse").is_known());
    }

    #[test]
    fn test_board_serde_roundtrip_as_plain_string() {
        let json = serde_json::to_string(&Board::Icse).unwrap();
        assert_eq!(json, "\"ICSE\"");

        let parsed: Board = serde_json::from_str("\"STATE\"").unwrap();
        assert_eq!(parsed, Board::Other("STATE".to_string()));
    }

    #[test]
    fn test_language_default_and_parsing() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::from("marathi"), Language::Marathi);
        assert_eq!(Language::from("tamil").as_str(), "tamil");
    }

    #[test]
    fn test_grade_level_bands() {
        assert_eq!(GradeLevel::from_grade(3), GradeLevel::Elementary);
        assert_eq!(GradeLevel::from_grade(5), GradeLevel::Elementary);
        assert_eq!(GradeLevel::from_grade(6), GradeLevel::MiddleSchool);
        assert_eq!(GradeLevel::from_grade(8), GradeLevel::MiddleSchool);
        assert_eq!(GradeLevel::from_grade(9), GradeLevel::HighSchool);
        assert_eq!(GradeLevel::from_grade(13), GradeLevel::HighSchool);
        assert_eq!(
            serde_json::to_string(&GradeLevel::MiddleSchool).unwrap(),
            "\"middle_school\""
        );
    }
}
