// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod extraction;
pub mod search_result;

pub use document::{Document, DocumentMetadata, RetrievalMatch};
pub use extraction::{ExtractionResult, UrlInput};
pub use search_result::{SearchResult, Topic};
