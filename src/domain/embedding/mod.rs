//! Embedding provider domain models and traits

mod provider;

pub use provider::{cosine_similarity, EmbeddingProvider};

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
