// file: src/providers/tavily.rs
// description: Tavily search and extract API client
// reference: https://docs.tavily.com/documentation/api-reference

use crate::config::TavilyConfig;
use crate::error::{Result, ToolError};
use crate::models::{ExtractionResult, SearchResult, Topic};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    topic: Topic,
    search_depth: &'a str,
    max_results: usize,
    include_images: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    urls: &'a [String],
    format: &'a str,
    include_images: bool,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    results: Vec<ExtractionResult>,
    #[serde(default)]
    failed_results: Vec<FailedExtraction>,
}

#[derive(Debug, Deserialize)]
struct FailedExtraction {
    url: String,
    #[serde(default)]
    error: Option<String>,
}

/// One request per call; retries belong to the tool wrappers.
pub struct TavilyClient {
    client: Client,
    config: TavilyConfig,
}

impl TavilyClient {
    pub fn new(client: Client, config: TavilyConfig) -> Self {
        Self { client, config }
    }

    pub async fn search(&self, query: &str, topic: Topic) -> Result<Vec<SearchResult>> {
        let request = SearchRequest {
            query,
            topic,
            search_depth: &self.config.search_depth,
            max_results: self.config.max_results,
            include_images: false,
        };

        let response: SearchResponse = self.post("search", &request).await?;

        Ok(response
            .results
            .into_iter()
            .take(self.config.max_results)
            .map(|hit| SearchResult::new(hit.url, hit.title, hit.content))
            .collect())
    }

    pub async fn extract(&self, urls: &[String]) -> Result<Vec<ExtractionResult>> {
        let request = ExtractRequest {
            urls,
            format: "markdown",
            include_images: true,
        };

        let response: ExtractResponse = self.post("extract", &request).await?;

        for failed in &response.failed_results {
            warn!(
                url = %failed.url,
                reason = failed.error.as_deref().unwrap_or("unknown"),
                "Tavily could not extract page"
            );
        }

        Ok(response.results)
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let operation = format!("tavily_{}", endpoint);
        debug!("POST {}", url);

        let mut builder = self.client.post(&url).json(body);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ToolError::from_transport(&operation, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ToolError::Api {
                service: "Tavily".to_string(),
                status: status.as_u16(),
                body: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ToolError::from_transport(&operation, e))
    }
}
