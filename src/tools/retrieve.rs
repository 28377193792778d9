// file: src/tools/retrieve.rs
// description: knowledge base similarity retrieval tool with store-unavailable retries
// reference: https://docs.rs/lancedb

use crate::database::VectorStoreAccessor;
use crate::error::Result;
use crate::models::RetrievalMatch;
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
pub struct RetrieveInput {
    /// Text query for retrieval, e.g. "attention is all you need paper"
    pub query: String,
}

pub struct VectorStoreRetrievalTool {
    accessor: Arc<VectorStoreAccessor>,
    policy: RetryPolicy,
    top_k: usize,
}

impl VectorStoreRetrievalTool {
    pub const NAME: &'static str = "vector_store_retrieval";

    pub fn new(accessor: Arc<VectorStoreAccessor>, policy: RetryPolicy) -> Self {
        let top_k = accessor.config().top_k;
        Self {
            accessor,
            policy,
            top_k,
        }
    }

    /// Closest documents first; lower scores are better.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievalMatch>> {
        let accessor = &self.accessor;
        let top_k = self.top_k;

        let result = async {
            Validator::validate_query_not_empty(query)?;
            self.policy
                .run(Self::NAME, move || async move {
                    let store = accessor.get_vector_store().await?;
                    store.similarity_search_with_score(query, top_k).await
                })
                .await
        }
        .await;

        match &result {
            Ok(matches) => info!(
                query = %Validator::truncate_text(query, 80),
                documents = matches.len(),
                "Documents retrieved successfully"
            ),
            Err(e) => error!(
                query = %Validator::truncate_text(query, 80),
                error = %e,
                "Failed to retrieve documents"
            ),
        }

        result
    }
}

#[async_trait]
impl Tool for VectorStoreRetrievalTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Retrieves the 3 most similar documents from the knowledge base, with scores (lower is better)."
    }

    fn input_schema(&self) -> Value {
        schema_of::<RetrieveInput>()
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        let input: RetrieveInput = parse_input(Self::NAME, input)?;
        let matches = self.retrieve(&input.query).await?;
        Ok(serde_json::to_value(matches)?)
    }
}
