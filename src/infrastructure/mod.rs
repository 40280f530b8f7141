//! Infrastructure layer - provider integrations, vector stores and services

pub mod embedding;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod services;
pub mod vector_store;
