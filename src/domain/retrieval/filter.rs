//! Metadata filtering for vector store queries

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators for metadata filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Eq,
    /// Field value (or any element of an array field) is in the list
    In,
}

/// Filter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Integer(i64),
    List(Vec<FilterValue>),
}

impl FilterValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::from(s.as_str()),
            Self::Integer(n) => Value::from(*n),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    // stores may hand integers back as floats, so numbers compare numerically
    fn matches_scalar(&self, actual: &Value) -> bool {
        match (self, actual) {
            (Self::String(expected), Value::String(actual)) => expected == actual,
            (Self::Integer(expected), Value::Number(actual)) => {
                actual.as_f64() == Some(*expected as f64)
            }
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

/// A single `key op value` condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub key: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterCondition {
    pub fn eq(key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            key: key.into(),
            operator: FilterOperator::Eq,
            value: value.into(),
        }
    }

    pub fn in_list(key: impl Into<String>, values: Vec<FilterValue>) -> Self {
        Self {
            key: key.into(),
            operator: FilterOperator::In,
            value: FilterValue::List(values),
        }
    }

    /// Evaluate against a metadata object. Missing fields never match.
    pub fn matches(&self, metadata: &serde_json::Map<String, Value>) -> bool {
        let Some(actual) = metadata.get(&self.key) else {
            return false;
        };

        let candidates = match (&self.operator, &self.value) {
            (FilterOperator::Eq, value) => std::slice::from_ref(value),
            (FilterOperator::In, FilterValue::List(values)) => values.as_slice(),
            (FilterOperator::In, _) => return false,
        };
        let any_candidate = |value: &Value| candidates.iter().any(|c| c.matches_scalar(value));

        match actual {
            Value::Array(items) => items.iter().any(any_candidate),
            _ => any_candidate(actual),
        }
    }
}

/// Conjunction of conditions; every condition must hold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFilter {
    conditions: Vec<FilterCondition>,
}

impl MetadataFilter {
    pub fn new(conditions: Vec<FilterCondition>) -> Self {
        Self { conditions }
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Field keys in condition order, without repeats
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::with_capacity(self.conditions.len());
        for condition in &self.conditions {
            if !keys.contains(&condition.key.as_str()) {
                keys.push(&condition.key);
            }
        }
        keys
    }

    /// An empty filter matches everything
    pub fn matches(&self, metadata: &serde_json::Map<String, Value>) -> bool {
        self.conditions.iter().all(|c| c.matches(metadata))
    }
}

#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<FilterCondition>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.conditions.push(FilterCondition::eq(key, value));
        self
    }

    pub fn in_list(mut self, key: impl Into<String>, values: Vec<FilterValue>) -> Self {
        self.conditions.push(FilterCondition::in_list(key, values));
        self
    }

    pub fn build(self) -> MetadataFilter {
        MetadataFilter::new(self.conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected an object"),
        }
    }

    #[test]
    fn test_builder_keeps_condition_order() {
        let filter = FilterBuilder::new()
            .eq("board", "CBSE")
            .eq("grade", 9u32)
            .build();

        assert_eq!(filter.conditions().len(), 2);
        assert_eq!(filter.conditions()[1], FilterCondition::eq("grade", 9u32));
        assert_eq!(filter.keys(), vec!["board", "grade"]);
        assert!(FilterBuilder::new().build().is_empty());
    }

    #[test]
    fn test_keys_are_deduplicated() {
        let filter = FilterBuilder::new()
            .eq("grade", 9u32)
            .eq("board", "CBSE")
            .eq("grade", 10u32)
            .build();

        assert_eq!(filter.keys(), vec!["grade", "board"]);
    }

    #[test]
    fn test_eq_matches_numbers_numerically() {
        let condition = FilterCondition::eq("grade", 9u32);
        assert!(condition.matches(&metadata(json!({"grade": 9}))));
        assert!(condition.matches(&metadata(json!({"grade": 9.0}))));
        assert!(!condition.matches(&metadata(json!({"grade": 9.5}))));
        assert!(!condition.matches(&metadata(json!({"grade": "9"}))));
        assert!(!condition.matches(&metadata(json!({}))));
    }

    #[test]
    fn test_in_matches_array_fields() {
        let condition = FilterCondition::in_list("method_tags", vec!["grouping".into()]);
        assert!(condition.matches(&metadata(json!({"method_tags": ["simple_factoring", "grouping"]}))));
        assert!(!condition.matches(&metadata(json!({"method_tags": ["quadratic_formula"]}))));
        assert!(condition.matches(&metadata(json!({"method_tags": "grouping"}))));
    }

    #[test]
    fn test_all_conditions_must_match() {
        let filter = FilterBuilder::new()
            .eq("board", "CBSE")
            .eq("grade", 10u32)
            .build();

        assert!(filter.matches(&metadata(json!({"board": "CBSE", "grade": 10}))));
        assert!(!filter.matches(&metadata(json!({"board": "ICSE", "grade": 10}))));
        assert!(MetadataFilter::default().matches(&metadata(json!({}))));
    }

    #[test]
    fn test_filter_serialization() {
        let filter = FilterBuilder::new()
            .eq("board", "CBSE")
            .in_list("method_tags", vec!["grouping".into()])
            .build();

        let json = serde_json::to_string(&filter).unwrap();
        let deserialized: MetadataFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, filter);
    }
}
