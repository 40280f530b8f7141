//! Vector store implementations

mod factory;
mod in_memory;
mod pinecone;

pub use factory::VectorStoreFactory;
pub use in_memory::InMemoryVectorStore;
pub use pinecone::{translate_filter, PineconeVectorStore};
