use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::AnthropicProvider;
use crate::domain::{DomainError, LlmProvider};
use crate::infrastructure::http_client::HttpClient;

/// Which chat API answers tutoring questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderKind {
    #[default]
    Anthropic,
}

impl LlmProviderKind {
    /// Environment variable holding the provider's API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    pub fn create(
        kind: LlmProviderKind,
        api_key: &str,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "Missing API key for LLM provider (set llm.api_key or {})",
                kind.api_key_env()
            )));
        }

        match kind {
            LlmProviderKind::Anthropic => {
                let client = HttpClient::with_timeout("anthropic", timeout)?;
                Ok(match base_url {
                    Some(url) => Arc::new(AnthropicProvider::with_base_url(client, api_key, url)),
                    None => Arc::new(AnthropicProvider::new(client, api_key)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider() {
        let timeout = Duration::from_secs(5);

        let provider =
            LlmProviderFactory::create(LlmProviderKind::Anthropic, "key", None, timeout).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");

        let provider = LlmProviderFactory::create(
            LlmProviderKind::Anthropic,
            "key",
            Some("http://localhost:8080"),
            timeout,
        )
        .unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = LlmProviderFactory::create(
            LlmProviderKind::Anthropic,
            "  ",
            None,
            Duration::from_secs(5),
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_kind_deserialization() {
        let kind: LlmProviderKind = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(kind, LlmProviderKind::Anthropic);

        assert!(serde_json::from_str::<LlmProviderKind>("\"cohere\"").is_err());
    }
}
