//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CurriculumConfig, EmbeddingConfig, LlmConfig, LogFormat, LoggingConfig,
    ServerConfig, VectorStoreBackend, VectorStoreConfig,
};
