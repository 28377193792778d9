// file: src/models/extraction.rs
// description: page extraction result and url input models
// reference: Produced by tavily_extract, consumed by vector_store_upsert

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResult {
    pub url: String,

    /// Page content in markdown
    pub raw_content: String,

    /// Image URLs found on the page, in document order
    #[serde(default)]
    pub images: Vec<String>,
}

/// One URL or a list of URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum UrlInput {
    One(String),
    Many(Vec<String>),
}

impl UrlInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            UrlInput::One(url) => vec![url],
            UrlInput::Many(urls) => urls,
        }
    }
}

impl From<&str> for UrlInput {
    fn from(url: &str) -> Self {
        UrlInput::One(url.to_string())
    }
}

impl From<Vec<String>> for UrlInput {
    fn from(urls: Vec<String>) -> Self {
        UrlInput::Many(urls)
    }
}
