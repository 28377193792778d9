// file: src/tools/mod.rs
// description: uniform tool interface exposed to the orchestrating agent
// reference: internal module structure

pub mod extract;
pub mod registry;
pub mod retrieve;
pub mod search;
pub mod upsert;

pub use extract::{ExtractInput, TavilyExtractTool};
pub use registry::{ToolDescriptor, ToolRegistry};
pub use retrieve::{RetrieveInput, VectorStoreRetrievalTool};
pub use search::{SearchInput, TavilySearchTool};
pub use upsert::{UpsertInput, VectorStoreUpsertTool};

use crate::error::{Result, ToolError};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A named operation the agent can call with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments accepted by `invoke`.
    fn input_schema(&self) -> Value;

    async fn invoke(&self, input: Value) -> Result<Value>;
}

pub(crate) fn schema_of<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

pub(crate) fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T> {
    serde_json::from_value(input).map_err(|e| ToolError::InvalidInput {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}
