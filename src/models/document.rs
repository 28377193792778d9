// file: src/models/document.rs
// description: knowledge base document model and retrieval match
// reference: internal data structures

use crate::models::ExtractionResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentMetadata {
    /// URL the text was extracted from
    pub source: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(text: String, source: String, images: Vec<String>) -> Self {
        Self {
            text,
            metadata: DocumentMetadata { source, images },
        }
    }

    /// Row id in the store, stable for the same source and text.
    pub fn id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.metadata.source.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl From<&ExtractionResult> for Document {
    fn from(result: &ExtractionResult) -> Self {
        Document::new(
            result.raw_content.clone(),
            result.url.clone(),
            result.images.clone(),
        )
    }
}

/// A document returned by similarity search. Lower scores are closer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RetrievalMatch {
    pub document: Document,
    pub score: f32,
}
