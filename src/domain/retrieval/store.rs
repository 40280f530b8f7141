//! Vector store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::chunk::ScoredChunk;
use super::filter::MetadataFilter;
use crate::domain::error::DomainError;

/// Similarity query against a single namespace
#[derive(Debug, Clone, PartialEq)]
pub struct VectorQuery {
    pub embedding: Vec<f32>,
    pub namespace: String,
    pub top_k: usize,
    pub filter: Option<MetadataFilter>,
}

impl VectorQuery {
    pub fn new(embedding: Vec<f32>, namespace: impl Into<String>, top_k: usize) -> Self {
        Self {
            embedding,
            namespace: namespace.into(),
            top_k,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Vector index holding curriculum chunks.
///
/// Implementations translate [`MetadataFilter`] into the backend's own filter
/// language and return matches ordered by descending score.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Backend name used in logs
    fn provider_type(&self) -> &'static str;

    async fn similarity_search(&self, query: VectorQuery) -> Result<Vec<ScoredChunk>, DomainError>;

    async fn health_check(&self) -> Result<bool, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock vector store returning queued responses in order.
    ///
    /// Once the queue is drained every further search returns no results.
    #[derive(Debug, Default)]
    pub struct MockVectorStore {
        responses: Mutex<VecDeque<Vec<ScoredChunk>>>,
        queries: Mutex<Vec<VectorQuery>>,
        search_count: AtomicUsize,
        should_fail: AtomicBool,
    }

    impl MockVectorStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the results for the next search call
        pub fn with_response(self, results: Vec<ScoredChunk>) -> Self {
            self.responses.lock().unwrap().push_back(results);
            self
        }

        pub fn failing() -> Self {
            let store = Self::default();
            store.should_fail.store(true, Ordering::SeqCst);
            store
        }

        pub fn search_count(&self) -> usize {
            self.search_count.load(Ordering::SeqCst)
        }

        /// Every query received, in call order
        pub fn queries(&self) -> Vec<VectorQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorStore for MockVectorStore {
        fn provider_type(&self) -> &'static str {
            "mock"
        }

        async fn similarity_search(
            &self,
            query: VectorQuery,
        ) -> Result<Vec<ScoredChunk>, DomainError> {
            self.search_count.fetch_add(1, Ordering::SeqCst);
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(DomainError::vector_store("Mock store configured to fail"));
            }

            let top_k = query.top_k;
            self.queries.lock().unwrap().push(query);

            let results = self.responses.lock().unwrap().pop_front().unwrap_or_default();
            Ok(results.into_iter().take(top_k).collect())
        }

        async fn health_check(&self) -> Result<bool, DomainError> {
            Ok(!self.should_fail.load(Ordering::SeqCst))
        }
    }
}
