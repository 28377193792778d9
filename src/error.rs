// file: src/error.rs
// description: Custom error types, failure taxonomy and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolError>;

/// Coarse failure classes used by the retry policy and by callers that
/// decide on higher level fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransientNetwork,
    StoreUnavailable,
    Structural,
    Unclassified,
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error during {operation}: {message}")]
    Network { operation: String, message: String },

    #[error("Request timed out during {operation}: {message}")]
    Timeout { operation: String, message: String },

    #[error("Vector store unavailable during {operation}: {message}")]
    StoreUnavailable { operation: String, message: String },

    #[error("{service} request failed with status {status}: {body}")]
    Api {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Prompt '{name}' returned an unexpected structure")]
    PromptStructure { name: String },

    #[error("Prompt '{name}' returned an empty message list")]
    EmptyPrompt { name: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input for tool {tool}: {message}")]
    InvalidInput { tool: String, message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("HTTP error during {operation}: {source}")]
    Http {
        operation: String,
        source: reqwest::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Classify a reqwest failure. Connection, request and body transport
    /// errors count as network failures; everything else stays unclassified.
    pub fn from_transport(operation: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ToolError::Timeout {
                operation: operation.to_string(),
                message: err.to_string(),
            }
        } else if err.is_connect() || err.is_request() || err.is_body() {
            ToolError::Network {
                operation: operation.to_string(),
                message: err.to_string(),
            }
        } else {
            ToolError::Http {
                operation: operation.to_string(),
                source: err,
            }
        }
    }

    /// Same as `from_transport`, but connection and timeout failures are
    /// reported against the store. Used by the embedding client, which the
    /// store calls implicitly on every add and search.
    pub fn from_store_transport(operation: &str, err: reqwest::Error) -> Self {
        match Self::from_transport(operation, err) {
            ToolError::Network { operation, message } | ToolError::Timeout { operation, message } => {
                ToolError::StoreUnavailable { operation, message }
            }
            other => other,
        }
    }

    pub fn from_store(operation: &str, err: lancedb::Error) -> Self {
        if matches!(err, lancedb::Error::ObjectStore { .. }) {
            ToolError::StoreUnavailable {
                operation: operation.to_string(),
                message: err.to_string(),
            }
        } else {
            ToolError::Database(format!("{} failed: {}", operation, err))
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::Network { .. } | ToolError::Timeout { .. } => ErrorKind::TransientNetwork,
            ToolError::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            ToolError::PromptStructure { .. } | ToolError::EmptyPrompt { .. } => {
                ErrorKind::Structural
            }
            _ => ErrorKind::Unclassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let timeout = ToolError::Timeout {
            operation: "tavily_search".to_string(),
            message: "deadline elapsed".to_string(),
        };
        assert_eq!(timeout.kind(), ErrorKind::TransientNetwork);

        let store = ToolError::StoreUnavailable {
            operation: "add_texts".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(store.kind(), ErrorKind::StoreUnavailable);

        let empty = ToolError::EmptyPrompt {
            name: "team/prompt".to_string(),
        };
        assert_eq!(empty.kind(), ErrorKind::Structural);

        let api = ToolError::Api {
            service: "Tavily".to_string(),
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(api.kind(), ErrorKind::Unclassified);
    }

    #[test]
    fn test_prompt_errors_name_the_prompt() {
        let err = ToolError::PromptStructure {
            name: "team/prompt".to_string(),
        };
        assert!(err.to_string().contains("team/prompt"));
    }

    #[tokio::test]
    async fn test_connect_failure_is_transient() {
        let client = reqwest::Client::new();
        // Port 9 on localhost is not expected to accept connections.
        let err = client
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("connection should be refused");

        let classified = ToolError::from_transport("probe", err);
        assert_eq!(classified.kind(), ErrorKind::TransientNetwork);
    }

    #[tokio::test]
    async fn test_store_transport_maps_to_store_unavailable() {
        let client = reqwest::Client::new();
        let err = client
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("connection should be refused");

        let classified = ToolError::from_store_transport("embed", err);
        assert_eq!(classified.kind(), ErrorKind::StoreUnavailable);
    }
}
