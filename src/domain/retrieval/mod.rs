//! Retrieval domain: content chunks, metadata filters and the vector store seam

mod chunk;
mod filter;
mod registry;
mod retrieval_filter;
mod store;

pub use chunk::{ChunkSummary, ContentChunk, ContentMetadata, ScoredChunk};
pub use filter::{FilterBuilder, FilterCondition, FilterOperator, FilterValue, MetadataFilter};
pub use registry::VectorStoreRegistry;
pub use retrieval_filter::{
    RetrievalFilter, BOARD_KEY, GRADE_KEY, LANGUAGE_KEY, METHOD_TAGS_KEY, SUBTOPIC_KEY,
};
pub use store::{VectorQuery, VectorStore};

#[cfg(test)]
pub use store::mock;
