// file: src/tools/search.rs
// description: web search tool with transient-network retries
// reference: https://docs.tavily.com/documentation/api-reference/endpoint/search

use crate::error::Result;
use crate::models::{SearchResult, Topic};
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
pub struct SearchInput {
    /// Query to search the web for
    pub query: String,
    /// Topic context: general, news or finance
    #[serde(default)]
    pub topic: Topic,
}

pub struct TavilySearchTool {
    client: Arc<TavilyClient>,
    policy: RetryPolicy,
}

impl TavilySearchTool {
    pub const NAME: &'static str = "tavily_search";

    pub fn new(client: Arc<TavilyClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Top results for `query`, at most the client's `max_results`.
    pub async fn search(&self, query: &str, topic: Topic) -> Result<Vec<SearchResult>> {
        let client = &self.client;
        let result = async {
            Validator::validate_query_not_empty(query)?;
            self.policy
                .run(Self::NAME, move || client.search(query, topic))
                .await
        }
        .await;

        match &result {
            Ok(results) => info!(
                query,
                topic = %topic,
                results = results.len(),
                "Tavily search completed"
            ),
            Err(e) => error!(query, topic = %topic, error = %e, "Error searching the web"),
        }

        result
    }
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Searches the web for the given query. Returns the top 3 results with URL, title and snippet."
    }

    fn input_schema(&self) -> Value {
        schema_of::<SearchInput>()
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        let input: SearchInput = parse_input(Self::NAME, input)?;
        let results = self.search(&input.query, input.topic).await?;
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
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn search_tool(base_url: String, timeout: Duration) -> TavilySearchTool {
        let http = reqwest::Client::builder().timeout(timeout).build().unwrap();
        let client = TavilyClient::new(
            http,
            TavilyConfig {
                api_key: None,
                base_url,
                search_depth: "advanced".to_string(),
                max_results: 3,
            },
        );
        let policy = RetryPolicy::new(RetryOn::TransientNetwork)
            .with_time_unit(Duration::from_millis(1));
        TavilySearchTool::new(Arc::new(client), policy)
    }

    #[tokio::test]
    async fn test_search_returns_at_most_three_results() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"url": "https://en.wikipedia.org/wiki/Paris", "title": "Paris", "content": "Capital of France"},
                    {"url": "https://www.britannica.com/place/Paris", "title": "Paris | Britannica", "content": "Paris"},
                    {"url": "https://www.france.fr/en/paris", "title": "Visit Paris", "content": "City of light"},
                    {"url": "https://example.com/extra", "title": "Extra", "content": "Extra"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let tool = search_tool(mock_server.uri(), Duration::from_secs(5));
        let results = tool.search("capital of France", Topic::General).await.unwrap();

        assert!(results.len() <= 3);
        assert!(results.iter().all(|r| !r.url.is_empty() && !r.title.is_empty()));
    }

    #[tokio::test]
    async fn test_empty_upstream_results_are_not_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&mock_server)
            .await;

        let tool = search_tool(mock_server.uri(), Duration::from_secs(5));
        assert!(tool.search("nothing", Topic::News).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_timeouts_are_retried_three_times() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .expect(3)
            .mount(&mock_server)
            .await;

        let tool = search_tool(mock_server.uri(), Duration::from_millis(50));
        let err = tool.search("slow", Topic::General).await.unwrap_err();

        assert!(matches!(err, ToolError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_api_errors_are_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = search_tool(mock_server.uri(), Duration::from_secs(5));
        let err = tool.search("q", Topic::General).await.unwrap_err();

        assert!(matches!(err, ToolError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_invoke_parses_json_arguments() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"url": "https://a.com", "title": "A", "content": "a"}]
            })))
            .mount(&mock_server)
            .await;

        let tool = search_tool(mock_server.uri(), Duration::from_secs(5));
        let output = tool
            .invoke(json!({"query": "rust", "topic": "news"}))
            .await
            .unwrap();
        assert_eq!(
            output,
            json!([{"url": "https://a.com", "title": "A", "snippet": "a"}])
        );

        let err = tool.invoke(json!({"topic": "sports"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
    }
}
