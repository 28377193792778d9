// file: src/providers/mod.rs
// description: upstream web API clients
// reference: internal module structure

pub mod tavily;

pub use tavily::TavilyClient;
