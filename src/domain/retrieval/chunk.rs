//! Curriculum content chunks as stored in the vector index

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::curriculum::{Board, Language};

/// Descriptive metadata stored alongside each chunk's vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub subtopic: Option<String>,
    #[serde(default)]
    pub sub_method: Option<String>,
    #[serde(deserialize_with = "whole_number")]
    pub grade: u32,
    pub board: Board,
    #[serde(default)]
    pub language: Language,
    /// 1.0 (easiest) to 5.0; fractional steps order items within a level
    #[serde(default)]
    pub difficulty_level: Option<f32>,
    #[serde(default)]
    pub method_tags: Vec<String>,
    #[serde(default)]
    pub excluded_methods: Vec<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub learning_stage: Option<String>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub estimated_time_minutes: Option<u32>,
    #[serde(default)]
    pub text: String,
}

// Vector stores may hand numeric metadata back as floats (`9.0`)
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = f64::deserialize(deserializer)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(de::Error::custom(format!("expected a whole number, got {}", value)));
    }
    T::try_from(value as u64).map_err(|_| de::Error::custom(format!("{} is out of range", value)))
}

fn optional_whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    #[derive(Deserialize)]
    struct Wrapper<T: TryFrom<u64>>(#[serde(deserialize_with = "whole_number")] T);

    Option::<Wrapper<T>>::deserialize(deserializer).map(|w| w.map(|Wrapper(v)| v))
}

impl ContentMetadata {
    pub fn new(grade: u32, board: Board, text: impl Into<String>) -> Self {
        Self {
            content_id: None,
            topic: None,
            subtopic: None,
            sub_method: None,
            grade,
            board,
            language: Language::default(),
            difficulty_level: None,
            method_tags: Vec::new(),
            excluded_methods: Vec::new(),
            content_type: None,
            learning_stage: None,
            estimated_time_minutes: None,
            text: text.into(),
        }
    }

    /// JSON object form used for filter evaluation
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// A stored chunk: vector plus metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentChunk {
    pub id: String,
    /// Namespace (topic partition) the chunk lives in
    pub namespace: String,
    pub embedding: Vec<f32>,
    pub metadata: ContentMetadata,
}

/// A chunk returned by similarity search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredChunk {
    pub id: String,
    pub score: f32,
    pub metadata: ContentMetadata,
}

/// Per-result summary returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkSummary {
    pub content_id: Option<String>,
    pub subtopic: Option<String>,
    pub sub_method: Option<String>,
    pub method_tags: Vec<String>,
    pub difficulty_level: Option<f32>,
    pub content_type: Option<String>,
}

impl From<&ScoredChunk> for ChunkSummary {
    fn from(chunk: &ScoredChunk) -> Self {
        let meta = &chunk.metadata;
        Self {
            content_id: meta.content_id.clone(),
            subtopic: meta.subtopic.clone(),
            sub_method: meta.sub_method.clone(),
            method_tags: meta.method_tags.clone(),
            difficulty_level: meta.difficulty_level,
            content_type: meta.content_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_deserializes_with_defaults() {
        let meta: ContentMetadata = serde_json::from_value(json!({
            "grade": 9,
            "board": "CBSE",
            "text": "Factor by splitting the middle term."
        }))
        .unwrap();

        assert_eq!(meta.board, Board::Cbse);
        assert_eq!(meta.language, Language::English);
        assert!(meta.method_tags.is_empty());
        assert!(meta.subtopic.is_none());
    }

    #[test]
    fn test_float_numbers_are_accepted() {
        let meta: ContentMetadata = serde_json::from_value(json!({
            "grade": 10.0,
            "board": "SSC",
            "difficulty_level": 3.6,
            "estimated_time_minutes": 15.0
        }))
        .unwrap();

        assert_eq!(meta.grade, 10);
        assert_eq!(meta.difficulty_level, Some(3.6));
        assert_eq!(meta.estimated_time_minutes, Some(15));

        let meta: ContentMetadata =
            serde_json::from_value(json!({"grade": 9, "board": "SSC", "difficulty_level": 2}))
                .unwrap();
        assert_eq!(meta.difficulty_level, Some(2.0));

        let err = serde_json::from_value::<ContentMetadata>(json!({"grade": 9.5, "board": "SSC"}));
        assert!(err.is_err());
    }

    #[test]
    fn test_json_map_has_filterable_fields() {
        let mut meta = ContentMetadata::new(10, Board::Icse, "text");
        meta.method_tags = vec!["grouping".to_string()];

        let map = meta.to_json_map();
        assert_eq!(map["grade"], json!(10));
        assert_eq!(map["board"], json!("ICSE"));
        assert_eq!(map["language"], json!("english"));
        assert_eq!(map["method_tags"], json!(["grouping"]));
    }
}
