// file: src/database/mod.rs
// description: vector store module exports
// reference: internal module structure

pub mod accessor;
pub mod client;
pub mod embeddings;
pub mod schema;

pub use accessor::VectorStoreAccessor;
pub use client::VectorStore;
pub use embeddings::{EmbeddingFunction, OpenAiEmbeddingClient};
pub use schema::SchemaManager;
