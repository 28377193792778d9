// file: src/prompts/mod.rs
// description: system prompt retrieval from a remote prompt registry
// reference: https://docs.smith.langchain.com/prompt_engineering

pub mod hub;
pub mod manifest;

pub use hub::LangSmithClient;
pub use manifest::{PromptManifest, PromptMessage};

use crate::error::{Result, ToolError};
use crate::utils::Validator;
use async_trait::async_trait;
use tracing::{error, info};

/// A versioned store of prompt templates.
#[async_trait]
pub trait PromptRegistry: Send + Sync {
    /// Fetch `name` at `version`, or the latest commit when `version` is None.
    async fn pull_prompt(&self, name: &str, version: Option<&str>) -> Result<PromptManifest>;
}

/// Fetch a prompt and reduce it to the text of its first message.
///
/// Nested templates win over direct content. An empty message list and an
/// unrecognized first message are both errors naming the prompt. Nothing is
/// retried here.
pub async fn get_prompt<R>(registry: &R, name: &str, version: Option<&str>) -> Result<String>
where
    R: PromptRegistry + ?Sized,
{
    let result = fetch_prompt_text(registry, name, version).await;

    match &result {
        Ok(_) => info!(
            "Successfully retrieved prompt '{}' version {}",
            name,
            version.unwrap_or("latest")
        ),
        Err(e) => error!(
            prompt = name,
            version = version.unwrap_or("latest"),
            error = %e,
            "Error retrieving prompt"
        ),
    }

    result
}

async fn fetch_prompt_text<R>(registry: &R, name: &str, version: Option<&str>) -> Result<String>
where
    R: PromptRegistry + ?Sized,
{
    Validator::validate_prompt_name(name)?;

    let manifest = registry.pull_prompt(name, version).await?;

    match manifest.messages.into_iter().next() {
        Some(PromptMessage::Template(template)) => Ok(template),
        Some(PromptMessage::Content(content)) => Ok(content),
        Some(PromptMessage::Unrecognized) => Err(ToolError::PromptStructure {
            name: name.to_string(),
        }),
        None => Err(ToolError::EmptyPrompt {
            name: name.to_string(),
        }),
    }
}
