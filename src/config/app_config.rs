use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::llm::LlmProviderKind;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub vector_store: VectorStoreConfig,
    pub curriculum: CurriculumConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Chat model used to compose answers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Falls back to the provider's API key environment variable
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub timeout_secs: u64,
    /// Falls back to `OPENAI_API_KEY`
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorStoreBackend {
    #[default]
    InMemory,
    Pinecone,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    pub backend: VectorStoreBackend,
    pub top_k: usize,
    pub adaptive_top_k: usize,
    pub timeout_secs: u64,
    /// Falls back to `PINECONE_API_KEY`
    pub api_key: Option<String>,
    /// JSON array of chunks loaded into the in-memory backend
    pub seed_file: Option<String>,
    /// Index name to Pinecone data-plane host
    pub indexes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurriculumConfig {
    /// Replaces the built-in curriculum when set
    pub path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::default(),
            model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            timeout_secs: 60,
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            timeout_secs: 30,
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            backend: VectorStoreBackend::default(),
            top_k: 5,
            adaptive_top_k: 10,
            timeout_secs: 30,
            api_key: None,
            seed_file: None,
            indexes: BTreeMap::new(),
        }
    }
}

impl LlmConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), self.provider.api_key_env())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl EmbeddingConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), "OPENAI_API_KEY")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl VectorStoreConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), "PINECONE_API_KEY")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn resolve_key(configured: Option<&str>, env_var: &str) -> Option<String> {
    configured
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok().filter(|k| !k.trim().is_empty()))
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
