// file: src/database/embeddings.rs
// description: OpenAI-compatible embeddings API integration for the vector store
// reference: https://platform.openai.com/docs/api-reference/embeddings

use crate::config::EmbeddingConfig;
use crate::error::{Result, ToolError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Turns text into fixed-length vectors. The vector store calls this on
/// every add and every search.
#[async_trait]
pub trait EmbeddingFunction: Send + Sync {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_documents(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| ToolError::Database("No embedding returned for query".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

pub struct OpenAiEmbeddingClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiEmbeddingClient {
    pub fn new(client: Client, config: &EmbeddingConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl EmbeddingFunction for OpenAiEmbeddingClient {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            input: texts,
            model: &self.model,
        };

        debug!(
            "Requesting {} embeddings from {} with model {}",
            texts.len(),
            url,
            self.model
        );

        let mut builder = self.client.post(&url).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ToolError::from_store_transport("embed", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ToolError::Api {
                service: "Embeddings".to_string(),
                status: status.as_u16(),
                body: error_text,
            });
        }

        let mut embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ToolError::from_store_transport("embed", e))?;

        if embedding_response.data.len() != texts.len() {
            return Err(ToolError::Database(format!(
                "Embeddings API returned {} vectors for {} inputs",
                embedding_response.data.len(),
                texts.len()
            )));
        }

        embedding_response.data.sort_by_key(|d| d.index);
        debug!(
            "Received {} embeddings of dimension {}",
            embedding_response.data.len(),
            embedding_response.data[0].embedding.len()
        );

        Ok(embedding_response
            .data
            .into_iter()
            .map(|d| d.embedding)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> OpenAiEmbeddingClient {
        let config = EmbeddingConfig {
            api_key: Some("sk-test".to_string()),
            base_url,
            model: "text-embedding-3-small".to_string(),
        };
        OpenAiEmbeddingClient::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn test_embed_documents_orders_by_index() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "text-embedding-3-small"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"embedding": [0.0, 1.0], "index": 1},
                    {"embedding": [1.0, 0.0], "index": 0}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let embeddings = client
            .embed_documents(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        assert_eq!(embeddings, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_empty_input_skips_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        assert!(client.embed_documents(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let err = client.embed_query("hello").await.unwrap_err();
        assert!(matches!(err, ToolError::Api { status: 401, .. }));
    }
}
