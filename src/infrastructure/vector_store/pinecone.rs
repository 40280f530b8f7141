//! Pinecone data-plane client

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::domain::retrieval::{FilterCondition, FilterOperator};
use crate::domain::{
    ContentMetadata, DomainError, MetadataFilter, ScoredChunk, VectorQuery, VectorStore,
};
use crate::infrastructure::http_client::HttpClientTrait;

/// One Pinecone index, addressed by its data-plane host
#[derive(Debug)]
pub struct PineconeVectorStore<C: HttpClientTrait> {
    client: C,
    api_key: String,
    host: String,
}

impl<C: HttpClientTrait> PineconeVectorStore<C> {
    /// `host` is the index host, with or without scheme
    pub fn new(client: C, api_key: impl Into<String>, host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host.trim_end_matches('/');
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };

        Self {
            client,
            api_key: api_key.into(),
            host,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Api-Key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_query(&self, query: &VectorQuery) -> Value {
        let mut body = json!({
            "vector": query.embedding,
            "namespace": query.namespace,
            "topK": query.top_k,
            "includeMetadata": true,
        });

        if let Some(filter) = query.filter.as_ref().filter(|f| !f.is_empty()) {
            body["filter"] = translate_filter(filter);
        }

        body
    }

    fn parse_matches(&self, json: Value) -> Result<Vec<ScoredChunk>, DomainError> {
        let response: QueryResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::vector_store(format!("Failed to parse Pinecone query response: {}", e))
        })?;

        let mut chunks = Vec::with_capacity(response.matches.len());
        for m in response.matches {
            let metadata = m.metadata.unwrap_or(Value::Object(Map::new()));
            match serde_json::from_value::<ContentMetadata>(metadata) {
                Ok(metadata) => chunks.push(ScoredChunk {
                    id: m.id,
                    score: m.score,
                    metadata,
                }),
                Err(e) => warn!(id = %m.id, error = %e, "Skipping match with unusable metadata"),
            }
        }

        Ok(chunks)
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorStore for PineconeVectorStore<C> {
    fn provider_type(&self) -> &'static str {
        "pinecone"
    }

    async fn similarity_search(&self, query: VectorQuery) -> Result<Vec<ScoredChunk>, DomainError> {
        let body = self.build_query(&query);
        debug!(namespace = %query.namespace, top_k = query.top_k, "Querying Pinecone");

        let response = self
            .client
            .post_json(&self.url("/query"), self.headers(), &body)
            .await?;

        self.parse_matches(response)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        match self
            .client
            .post_json(&self.url("/describe_index_stats"), self.headers(), &json!({}))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(host = %self.host, error = %e, "Pinecone health check failed");
                Ok(false)
            }
        }
    }
}

/// Translate a metadata filter into Pinecone's Mongo-style filter language.
///
/// A single condition is sent bare, several are wrapped in `$and`.
pub fn translate_filter(filter: &MetadataFilter) -> Value {
    let mut parts: Vec<Value> = filter.conditions().iter().map(translate_condition).collect();
    if parts.len() == 1 {
        return parts.remove(0);
    }
    json!({ "$and": parts })
}

fn translate_condition(condition: &FilterCondition) -> Value {
    let op = match condition.operator {
        FilterOperator::Eq => "$eq",
        FilterOperator::In => "$in",
    };

    let mut inner = Map::new();
    inner.insert(op.to_string(), condition.value.to_json());

    let mut outer = Map::new();
    outer.insert(condition.key.clone(), Value::Object(inner));
    Value::Object(outer)
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<Value>,
}
