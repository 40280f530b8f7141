//! Domain layer - Core business logic and entities

pub mod curriculum;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod retrieval;
pub mod tutor;

pub use curriculum::{Board, Curriculum, GateDecision, GradeLevel, Language, TopicGradePolicy};
pub use embedding::EmbeddingProvider;
pub use error::DomainError;
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use prompt::{TemplateError, TutorPrompt, TutorPromptContext};
pub use retrieval::{
    ContentChunk, ContentMetadata, MetadataFilter, RetrievalFilter, ScoredChunk, VectorQuery,
    VectorStore, VectorStoreRegistry,
};
pub use tutor::{AdaptiveOutcome, RetrievalState, TutorOutcome, TutorQuestion};
