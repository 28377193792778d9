// file: src/toolkit.rs
// description: composition root wiring clients, the vector store accessor and tools
// reference: application bootstrap and orchestration

use crate::config::Config;
use crate::database::{EmbeddingFunction, OpenAiEmbeddingClient, VectorStoreAccessor};
use crate::error::{Result, ToolError};
use crate::prompts::{self, LangSmithClient, PromptRegistry};
use crate::providers::TavilyClient;
use crate::retry::{RetryOn, RetryPolicy};
use crate::tools::{
    TavilyExtractTool, TavilySearchTool, ToolRegistry, VectorStoreRetrievalTool,
    VectorStoreUpsertTool,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Everything an agent needs, built once before any tool runs.
pub struct ResearchToolkit {
    config: Config,
    accessor: Arc<VectorStoreAccessor>,
    prompts: Arc<dyn PromptRegistry>,
    registry: ToolRegistry,
}

impl ResearchToolkit {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|e| ToolError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let embeddings: Arc<dyn EmbeddingFunction> =
            Arc::new(OpenAiEmbeddingClient::new(http.clone(), &config.embeddings));
        let prompts: Arc<dyn PromptRegistry> =
            Arc::new(LangSmithClient::new(http.clone(), config.prompts.clone()));

        Self::with_components(config, http, embeddings, prompts)
    }

    /// Build with caller-supplied embedding and prompt backends.
    pub fn with_components(
        config: Config,
        http: reqwest::Client,
        embeddings: Arc<dyn EmbeddingFunction>,
        prompts: Arc<dyn PromptRegistry>,
    ) -> Result<Self> {
        config.validate()?;

        if config.tavily.api_key.is_none() {
            warn!("No Tavily API key configured - search and extract calls will be rejected upstream");
        }
        if config.embeddings.api_key.is_none() {
            warn!("No embeddings API key configured - knowledge base calls will be rejected upstream");
        }

        let tavily = Arc::new(TavilyClient::new(http, config.tavily.clone()));
        let accessor = Arc::new(VectorStoreAccessor::new(
            config.vector_store.clone(),
            embeddings,
        ));

        let network_policy = RetryPolicy::from_config(&config.retry, RetryOn::TransientNetwork);
        let store_policy = RetryPolicy::from_config(&config.retry, RetryOn::StoreUnavailable);

        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(TavilySearchTool::new(
                tavily.clone(),
                network_policy.clone(),
            )))
            .register(Arc::new(TavilyExtractTool::new(tavily, network_policy)))
            .register(Arc::new(VectorStoreUpsertTool::new(
                accessor.clone(),
                store_policy.clone(),
            )))
            .register(Arc::new(VectorStoreRetrievalTool::new(
                accessor.clone(),
                store_policy,
            )));

        info!("Research toolkit ready with tools: {:?}", registry.names());

        Ok(Self {
            config,
            accessor,
            prompts,
            registry,
        })
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn vector_store(&self) -> &Arc<VectorStoreAccessor> {
        &self.accessor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The agent's system prompt, fetched fresh on every call.
    pub async fn system_prompt(&self, name: &str, version: Option<&str>) -> Result<String> {
        prompts::get_prompt(self.prompts.as_ref(), name, version).await
    }
}
