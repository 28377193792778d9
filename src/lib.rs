// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod prompts;
pub mod providers;
pub mod retry;
pub mod toolkit;
pub mod tools;
pub mod utils;

pub use config::{
    Config, EmbeddingConfig, HttpConfig, PromptHubConfig, RetryConfig, TavilyConfig,
    VectorStoreConfig,
};
pub use database::{EmbeddingFunction, OpenAiEmbeddingClient, VectorStore, VectorStoreAccessor};
pub use error::{ErrorKind, Result, ToolError};
pub use models::{
    Document, DocumentMetadata, ExtractionResult, RetrievalMatch, SearchResult, Topic, UrlInput,
};
pub use prompts::{LangSmithClient, PromptManifest, PromptMessage, PromptRegistry, get_prompt};
pub use providers::TavilyClient;
pub use retry::{RetryOn, RetryPolicy};
pub use toolkit::ResearchToolkit;
pub use tools::{
    TavilyExtractTool, TavilySearchTool, Tool, ToolDescriptor, ToolRegistry,
    VectorStoreRetrievalTool, VectorStoreUpsertTool,
};
pub use utils::Validator;
pub use utils::logging::init_logger;
