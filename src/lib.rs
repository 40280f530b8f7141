//! Grade-aware tutoring API
//!
//! Answers student questions from curriculum content stored in vector
//! indexes, with:
//! - Grade gating per topic and board-aware retrieval filters
//! - Filter relaxation and fallback suggestions when nothing matches
//! - Adaptive content lists and learning-path recommendations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use domain::{Curriculum, DomainError};
use infrastructure::embedding::OpenAiEmbeddingProvider;
use infrastructure::http_client::HttpClient;
use infrastructure::llm::LlmProviderFactory;
use infrastructure::services::{TutorService, TutorServiceConfig, TutorServiceDeps};
use infrastructure::vector_store::VectorStoreFactory;

/// Load the curriculum named in config, or the built-in one
pub fn load_curriculum(config: &AppConfig) -> Result<Curriculum, DomainError> {
    match config.curriculum.path.as_deref() {
        Some(path) => Curriculum::load(path),
        None => Curriculum::builtin(),
    }
}

/// Wire providers, stores and the tutor service from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let curriculum = load_curriculum(config).context("failed to load curriculum")?;
    info!(topics = curriculum.len(), "Curriculum loaded");

    let llm_key = config.llm.resolved_api_key();
    let llm = LlmProviderFactory::create(
        config.llm.provider,
        llm_key.as_deref().unwrap_or_default(),
        config.llm.base_url.as_deref(),
        config.llm.timeout(),
    )?;

    let embedding_key = config
        .embedding
        .resolved_api_key()
        .ok_or_else(|| DomainError::configuration("OPENAI_API_KEY is not set"))?;
    let client = HttpClient::with_timeout("openai", config.embedding.timeout())?;
    let embedding = match config.embedding.base_url.as_deref() {
        Some(base_url) => OpenAiEmbeddingProvider::with_base_url(client, embedding_key, base_url),
        None => OpenAiEmbeddingProvider::new(client, embedding_key),
    }
    .with_model(&config.embedding.model);

    let stores = VectorStoreFactory::build_registry(&config.vector_store, &curriculum)?;
    info!(
        backend = ?config.vector_store.backend,
        indexes = stores.len(),
        "Vector stores ready"
    );

    let deps = TutorServiceDeps {
        curriculum: Arc::new(curriculum),
        embedding: Arc::new(embedding),
        llm,
        stores,
    };
    let service_config = TutorServiceConfig {
        model: config.llm.model.clone(),
        max_tokens: config.llm.max_tokens,
        temperature: config.llm.temperature,
        top_k: config.vector_store.top_k,
        adaptive_top_k: config.vector_store.adaptive_top_k,
    };

    Ok(AppState::new(TutorService::new(deps, service_config)))
}
