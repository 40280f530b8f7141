//! In-memory vector store for local development and tests

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::embedding::cosine_similarity;
use crate::domain::{ContentChunk, DomainError, ScoredChunk, VectorQuery, VectorStore};

/// Brute-force cosine search over a fixed set of chunks
#[derive(Debug, Default, Clone)]
pub struct InMemoryVectorStore {
    chunks: Arc<Vec<ContentChunk>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunks(chunks: Vec<ContentChunk>) -> Self {
        Self {
            chunks: Arc::new(chunks),
        }
    }

    /// Load chunks from a JSON array file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        let chunks: Vec<ContentChunk> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::with_chunks(chunks))
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn provider_type(&self) -> &'static str {
        "in_memory"
    }

    async fn similarity_search(&self, query: VectorQuery) -> Result<Vec<ScoredChunk>, DomainError> {
        let mut results: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .filter(|chunk| chunk.namespace == query.namespace)
            .filter(|chunk| {
                query
                    .filter
                    .as_ref()
                    .is_none_or(|f| f.matches(&chunk.metadata.to_json_map()))
            })
            .map(|chunk| ScoredChunk {
                id: chunk.id.clone(),
                score: cosine_similarity(&query.embedding, &chunk.embedding),
                metadata: chunk.metadata.clone(),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(query.top_k);

        Ok(results)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
