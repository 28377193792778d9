// file: src/database/accessor.rs
// description: lazily constructed, shared vector store handle
// reference: https://docs.rs/tokio/latest/tokio/sync/struct.OnceCell.html

use crate::config::VectorStoreConfig;
use crate::database::client::VectorStore;
use crate::database::embeddings::EmbeddingFunction;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Owns the single `VectorStore` for everything it is shared with.
///
/// The store is opened on the first `get_vector_store` call. Every later call
/// returns the same `Arc`. A failed open leaves the slot empty, so the next
/// call tries again. Concurrent first calls wait on one construction.
pub struct VectorStoreAccessor {
    config: VectorStoreConfig,
    embeddings: Arc<dyn EmbeddingFunction>,
    store: OnceCell<Arc<VectorStore>>,
}

impl VectorStoreAccessor {
    pub fn new(config: VectorStoreConfig, embeddings: Arc<dyn EmbeddingFunction>) -> Self {
        Self {
            config,
            embeddings,
            store: OnceCell::new(),
        }
    }

    pub async fn get_vector_store(&self) -> Result<Arc<VectorStore>> {
        self.store
            .get_or_try_init(|| async {
                match VectorStore::open(&self.config, self.embeddings.clone()).await {
                    Ok(store) => {
                        info!(
                            "LanceDB vector store initialized - Collection: '{}'",
                            self.config.collection
                        );
                        Ok(Arc::new(store))
                    }
                    Err(e) => {
                        error!(
                            uri = %self.config.uri,
                            collection = %self.config.collection,
                            error = %e,
                            "Error initializing vector store"
                        );
                        Err(e)
                    }
                }
            })
            .await
            .cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.store.initialized()
    }

    pub fn config(&self) -> &VectorStoreConfig {
        &self.config
    }
}
