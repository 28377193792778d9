// file: src/prompts/hub.rs
// description: LangSmith prompt hub client
// reference: https://docs.smith.langchain.com/reference/python/client

use crate::config::PromptHubConfig;
use crate::error::{Result, ToolError};
use crate::prompts::PromptRegistry;
use crate::prompts::manifest::PromptManifest;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PromptCommit {
    manifest: Value,
}

pub struct LangSmithClient {
    client: Client,
    config: PromptHubConfig,
}

impl LangSmithClient {
    pub fn new(client: Client, config: PromptHubConfig) -> Self {
        Self { client, config }
    }

    /// `owner/repo` or bare `repo`, which the hub resolves against `-`.
    fn split_name(name: &str) -> (&str, &str) {
        match name.split_once('/') {
            Some((owner, repo)) => (owner, repo),
            None => ("-", name),
        }
    }
}

#[async_trait]
impl PromptRegistry for LangSmithClient {
    async fn pull_prompt(&self, name: &str, version: Option<&str>) -> Result<PromptManifest> {
        let (owner, repo) = Self::split_name(name);
        let url = format!(
            "{}/commits/{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            owner,
            repo,
            version.unwrap_or("latest")
        );
        debug!("GET {}", url);

        let mut builder = self.client.get(&url);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.header("x-api-key", api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ToolError::from_transport("pull_prompt", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ToolError::Api {
                service: "LangSmith".to_string(),
                status: status.as_u16(),
                body: error_text,
            });
        }

        let commit: PromptCommit = response
            .json()
            .await
            .map_err(|e| ToolError::from_transport("pull_prompt", e))?;

        Ok(PromptManifest::from_value(&commit.manifest))
    }
}
