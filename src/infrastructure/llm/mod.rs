//! LLM provider implementations

mod anthropic;
mod factory;

pub use anthropic::AnthropicProvider;
pub use factory::{LlmProviderFactory, LlmProviderKind};
