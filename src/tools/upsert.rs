// file: src/tools/upsert.rs
// description: knowledge base upsert tool with store-unavailable retries
// reference: https://docs.rs/lancedb

use crate::database::VectorStoreAccessor;
use crate::error::Result;
use crate::models::{Document, DocumentMetadata, ExtractionResult};
use crate::retry::RetryPolicy;
use crate::tools::{Tool, parse_input, schema_of};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpsertInput {
    /// Extraction results from tavily_extract: url, raw_content and images
    pub results: Vec<ExtractionResult>,
}

pub struct VectorStoreUpsertTool {
    accessor: Arc<VectorStoreAccessor>,
    policy: RetryPolicy,
}

impl VectorStoreUpsertTool {
    pub const NAME: &'static str = "vector_store_upsert";

    pub fn new(accessor: Arc<VectorStoreAccessor>, policy: RetryPolicy) -> Self {
        Self { accessor, policy }
    }

    fn confirmation(count: usize) -> String {
        format!(
            "{} documents upserted into the knowledge base successfully.",
            count
        )
    }

    /// Embed and store `results`. An empty batch never touches the store.
    pub async fn upsert(&self, results: &[ExtractionResult]) -> Result<String> {
        if results.is_empty() {
            info!("No documents to upsert");
            return Ok(Self::confirmation(0));
        }

        let (texts, metadatas): (Vec<String>, Vec<DocumentMetadata>) = results
            .iter()
            .map(Document::from)
            .map(|doc| (doc.text, doc.metadata))
            .unzip();

        let accessor = &self.accessor;
        let outcome = self
            .policy
            .run(Self::NAME, move || {
                let texts = texts.clone();
                let metadatas = metadatas.clone();
                async move {
                    let store = accessor.get_vector_store().await?;
                    store.add_texts(texts, metadatas).await
                }
            })
            .await;

        match outcome {
            Ok(count) => {
                info!(documents = count, "Documents upserted successfully");
                Ok(Self::confirmation(count))
            }
            Err(e) => {
                let sources: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
                error!(sources = ?sources, error = %e, "Failed to upsert documents");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Tool for VectorStoreUpsertTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Embeds and upserts extraction results (raw_content, url, images) into the knowledge base. Returns a confirmation with the number of documents upserted."
    }

    fn input_schema(&self) -> Value {
        schema_of::<UpsertInput>()
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        let input: UpsertInput = parse_input(Self::NAME, input)?;
        let confirmation = self.upsert(&input.results).await?;
        Ok(Value::String(confirmation))
    }
}
