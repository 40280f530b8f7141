//! Lookup of vector stores by index name

use std::collections::BTreeMap;
use std::sync::Arc;

use super::store::VectorStore;
use crate::domain::DomainError;

/// Vector stores keyed by the index names used in the curriculum
#[derive(Debug, Clone, Default)]
pub struct VectorStoreRegistry {
    stores: BTreeMap<String, Arc<dyn VectorStore>>,
}

impl VectorStoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, index: impl Into<String>, store: Arc<dyn VectorStore>) -> Self {
        self.register(index, store);
        self
    }

    pub fn register(&mut self, index: impl Into<String>, store: Arc<dyn VectorStore>) {
        self.stores.insert(index.into(), store);
    }

    pub fn get(&self, index: &str) -> Option<Arc<dyn VectorStore>> {
        self.stores.get(index).cloned()
    }

    pub fn indexes(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Health of every registered store, in index order
    pub async fn health(&self) -> Vec<(String, Result<bool, DomainError>)> {
        let mut results = Vec::with_capacity(self.stores.len());
        for (index, store) in &self.stores {
            results.push((index.clone(), store.health_check().await));
        }
        results
    }
}
