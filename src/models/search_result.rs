// file: src/models/search_result.rs
// description: Web search result and search topic models
// reference: Produced by the tavily_search tool, never persisted

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    /// Page URL
    pub url: String,

    /// Page title
    pub title: String,

    /// Relevant excerpt returned by the search provider
    pub snippet: String,
}

impl SearchResult {
    pub fn new(url: String, title: String, snippet: String) -> Self {
        Self {
            url,
            title,
            snippet,
        }
    }
}

/// Search category understood by the search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    #[default]
    General,
    News,
    Finance,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::General => "general",
            Topic::News => "news",
            Topic::Finance => "finance",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
