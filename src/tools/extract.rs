// file: src/tools/extract.rs
// description: page content extraction tool with transient-network retries
// reference: https://docs.tavily.com/documentation/api-reference/endpoint/extract

use crate::error::Result;
use crate::models::{ExtractionResult, UrlInput};
use crate::providers::TavilyClient;
use crate::retry::RetryPolicy;
use crate::tools::{Tool, parse_input, schema_of};
use crate::utils::Validator;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractInput {
    /// URL or list of URLs to extract content from
    pub urls: UrlInput,
}

pub struct TavilyExtractTool {
    client: Arc<TavilyClient>,
    policy: RetryPolicy,
}

impl TavilyExtractTool {
    pub const NAME: &'static str = "tavily_extract";

    pub fn new(client: Arc<TavilyClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub async fn extract(&self, urls: impl Into<UrlInput>) -> Result<Vec<ExtractionResult>> {
        let urls = urls.into().into_vec();

        if urls.is_empty() {
            info!("Tavily extract skipped - no URLs given");
            return Ok(Vec::new());
        }

        let client = &self.client;
        let url_slice = urls.as_slice();
        let result = async {
            Validator::validate_urls(url_slice)?;
            self.policy
                .run(Self::NAME, move || client.extract(url_slice))
                .await
        }
        .await;

        match &result {
            Ok(results) => info!(
                requested = urls.len(),
                extracted = results.len(),
                "Tavily extract completed"
            ),
            Err(e) => error!(
                urls = ?urls,
                error = %e,
                "Error extracting data from pages"
            ),
        }

        result
    }
}

#[async_trait]
impl Tool for TavilyExtractTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Extracts the full content of the given URLs in Markdown format, with any images found on the pages."
    }

    fn input_schema(&self) -> Value {
        schema_of::<ExtractInput>()
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        let input: ExtractInput = parse_input(Self::NAME, input)?;
        let results = self.extract(input.urls).await?;
        Ok(serde_json::to_value(results)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TavilyConfig;
    use crate::error::ToolError;
    use crate::retry::RetryOn;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn extract_tool(base_url: String) -> TavilyExtractTool {
        let client = TavilyClient::new(
            reqwest::Client::new(),
            TavilyConfig {
                api_key: None,
                base_url,
                search_depth: "advanced".to_string(),
                max_results: 3,
            },
        );
        let policy = RetryPolicy::new(RetryOn::TransientNetwork)
            .with_time_unit(Duration::from_millis(1));
        TavilyExtractTool::new(Arc::new(client), policy)
    }

    #[tokio::test]
    async fn test_extract_single_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/extract"))
            .and(body_partial_json(json!({"urls": ["https://example.com"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "url": "https://example.com",
                    "raw_content": "# Example Domain\n\nThis domain is for use in illustrative examples.",
                    "images": []
                }],
                "failed_results": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = extract_tool(mock_server.uri());
        let results = tool
            .extract(vec!["https://example.com".to_string()])
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].raw_content.trim().is_empty());
    }

    #[tokio::test]
    async fn test_single_url_string_is_accepted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/extract"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = extract_tool(mock_server.uri());
        let output = tool
            .invoke(json!({"urls": "https://example.com"}))
            .await
            .unwrap();
        assert_eq!(output, json!([]));
    }

    #[tokio::test]
    async fn test_empty_url_list_skips_upstream() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tool = extract_tool(mock_server.uri());
        assert!(tool.extract(Vec::<String>::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tool = extract_tool(mock_server.uri());
        let err = tool.extract("example.com").await.unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_retried_then_surfaced() {
        // Nothing listens on port 9, so every attempt fails to connect.
        let tool = extract_tool("http://127.0.0.1:9".to_string());
        let err = tool.extract("https://example.com").await.unwrap_err();
        assert!(matches!(err, ToolError::Network { .. }));
    }
}
