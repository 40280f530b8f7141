//! Embedding provider trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Turns text into a dense vector for similarity search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;
}

/// Cosine similarity; 0.0 for mismatched, empty or zero-length vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn test_mock_provider_records_calls() {
        let mut provider = MockEmbeddingProvider::new();
        provider
            .expect_embed()
            .withf(|text| text == "What is a quadratic equation?")
            .times(1)
            .returning(|_| Ok(vec![0.1, 0.2, 0.3]));

        let vector = provider.embed("What is a quadratic equation?").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }
}
