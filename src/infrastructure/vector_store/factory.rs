//! Builds the vector store registry from configuration

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::{InMemoryVectorStore, PineconeVectorStore};
use crate::config::{VectorStoreBackend, VectorStoreConfig};
use crate::domain::{Curriculum, DomainError, VectorStoreRegistry};
use crate::infrastructure::http_client::HttpClient;

/// Factory for the vector stores behind each curriculum index
#[derive(Debug)]
pub struct VectorStoreFactory;

impl VectorStoreFactory {
    pub fn build_registry(
        config: &VectorStoreConfig,
        curriculum: &Curriculum,
    ) -> Result<VectorStoreRegistry, DomainError> {
        match config.backend {
            VectorStoreBackend::InMemory => Self::in_memory(config, curriculum),
            VectorStoreBackend::Pinecone => Self::pinecone(config),
        }
    }

    /// One shared store serves every index; namespaces keep topics apart
    fn in_memory(
        config: &VectorStoreConfig,
        curriculum: &Curriculum,
    ) -> Result<VectorStoreRegistry, DomainError> {
        let store = match &config.seed_file {
            Some(path) => InMemoryVectorStore::from_json_file(path)?,
            None => InMemoryVectorStore::new(),
        };
        let store: Arc<dyn crate::domain::VectorStore> = Arc::new(store);

        let indexes: BTreeSet<&str> = config
            .indexes
            .keys()
            .map(String::as_str)
            .chain(curriculum.topics().map(|(_, topic)| topic.index.as_str()))
            .collect();

        let mut registry = VectorStoreRegistry::new();
        for index in indexes {
            registry.register(index, store.clone());
        }

        info!(indexes = registry.len(), seed_file = ?config.seed_file, "In-memory vector store ready");
        Ok(registry)
    }

    fn pinecone(config: &VectorStoreConfig) -> Result<VectorStoreRegistry, DomainError> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            DomainError::configuration(
                "Missing Pinecone API key (set vector_store.api_key or PINECONE_API_KEY)",
            )
        })?;

        let mut registry = VectorStoreRegistry::new();
        for (index, host) in &config.indexes {
            if host.trim().is_empty() {
                warn!(index = %index, "No host configured for index, topics using it will return no results");
                continue;
            }

            let client = HttpClient::with_timeout("pinecone", config.timeout())?;
            registry.register(
                index.as_str(),
                Arc::new(PineconeVectorStore::new(client, api_key.as_str(), host.as_str())),
            );
        }

        info!(indexes = registry.len(), "Pinecone vector stores ready");
        Ok(registry)
    }
}
