// file: src/config.rs
// description: application configuration management with toml and env support
// reference: https://docs.rs/config

use crate::error::{Result, ToolError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub http: HttpConfig,
    pub tavily: TavilyConfig,
    pub embeddings: EmbeddingConfig,
    pub vector_store: VectorStoreConfig,
    pub prompts: PromptHubConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TavilyConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub search_depth: String,
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VectorStoreConfig {
    pub uri: String,
    pub collection: String,
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptHubConfig {
    pub api_key: Option<String>,
    pub api_url: String,
}

/// Backoff bounds are expressed in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub multiplier: f64,
    pub min_delay: f64,
    pub max_delay: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            multiplier: 1.0,
            min_delay: 2.0,
            max_delay: 10.0,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| ToolError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new("config/default.toml")).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RESEARCH_TOOLS")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ToolError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| ToolError::Config(e.to_string()))?;

        config.apply_conventional_keys();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            http: HttpConfig { timeout_secs: 30 },
            tavily: TavilyConfig {
                api_key: None,
                base_url: "https://api.tavily.com".to_string(),
                search_depth: "advanced".to_string(),
                max_results: 3,
            },
            embeddings: EmbeddingConfig {
                api_key: None,
                base_url: "https://api.openai.com/v1".to_string(),
                model: "text-embedding-3-small".to_string(),
            },
            vector_store: VectorStoreConfig {
                uri: "./lancedb".to_string(),
                collection: "research_agent".to_string(),
                top_k: 3,
            },
            prompts: PromptHubConfig {
                api_key: None,
                api_url: "https://api.smith.langchain.com".to_string(),
            },
            retry: RetryConfig::default(),
        }
    }

    /// Fill unset API keys from the variables the upstream SDKs read.
    fn apply_conventional_keys(&mut self) {
        fn fallback(slot: &mut Option<String>, var: &str) {
            if slot.is_none() {
                *slot = std::env::var(var).ok().filter(|v| !v.is_empty());
            }
        }

        fallback(&mut self.tavily.api_key, "TAVILY_API_KEY");
        fallback(&mut self.embeddings.api_key, "OPENAI_API_KEY");
        fallback(&mut self.prompts.api_key, "LANGSMITH_API_KEY");
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(ToolError::Config(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }

        let retry = &self.retry;
        if ![retry.multiplier, retry.min_delay, retry.max_delay]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ToolError::Config(
                "retry.multiplier, retry.min_delay and retry.max_delay must be finite".to_string(),
            ));
        }

        if retry.multiplier < 0.0 {
            return Err(ToolError::Config(
                "retry.multiplier must not be negative".to_string(),
            ));
        }

        if self.retry.min_delay < 0.0 || self.retry.min_delay > self.retry.max_delay {
            return Err(ToolError::Config(
                "retry.min_delay must be between 0 and retry.max_delay".to_string(),
            ));
        }

        if self.tavily.max_results == 0 {
            return Err(ToolError::Config(
                "tavily.max_results must be greater than 0".to_string(),
            ));
        }

        if self.vector_store.top_k == 0 {
            return Err(ToolError::Config(
                "vector_store.top_k must be greater than 0".to_string(),
            ));
        }

        if self.vector_store.collection.trim().is_empty() {
            return Err(ToolError::Config(
                "vector_store.collection must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
