// file: src/database/client.rs
// description: LanceDB-backed vector store with embedding on add and search
// reference: https://docs.rs/lancedb

use crate::config::VectorStoreConfig;
use crate::database::embeddings::EmbeddingFunction;
use crate::database::schema::SchemaManager;
use crate::error::{Result, ToolError};
use crate::models::{Document, DocumentMetadata, RetrievalMatch};
use arrow_array::RecordBatchIterator;
use futures::StreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, Table, connect};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct VectorStore {
    connection: Connection,
    collection: String,
    embeddings: Arc<dyn EmbeddingFunction>,
    // held across the exists check and create/add so concurrent first
    // inserts cannot both try to create the table
    write_lock: Mutex<()>,
}

impl VectorStore {
    pub async fn open(
        config: &VectorStoreConfig,
        embeddings: Arc<dyn EmbeddingFunction>,
    ) -> Result<Self> {
        info!("Opening LanceDB vector store at {}", config.uri);

        // Local stores need their directory up front so an unwritable path
        // fails here rather than on first insert.
        if !config.uri.contains("://") {
            tokio::fs::create_dir_all(Path::new(&config.uri)).await?;
        }

        let connection = connect(&config.uri)
            .execute()
            .await
            .map_err(|e| ToolError::from_store("connect", e))?;

        Ok(Self {
            connection,
            collection: config.collection.clone(),
            embeddings,
            write_lock: Mutex::new(()),
        })
    }

    pub async fn collection_exists(&self) -> Result<bool> {
        let table_names = self
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| ToolError::from_store("list tables", e))?;

        Ok(table_names.iter().any(|name| name == &self.collection))
    }

    async fn open_collection(&self) -> Result<Table> {
        self.connection
            .open_table(&self.collection)
            .execute()
            .await
            .map_err(|e| ToolError::from_store("open table", e))
    }

    pub async fn count(&self) -> Result<usize> {
        if !self.collection_exists().await? {
            return Ok(0);
        }

        self.open_collection()
            .await?
            .count_rows(None)
            .await
            .map_err(|e| ToolError::from_store("count rows", e))
    }

    /// Embed `texts` and append them with their metadata. The collection is
    /// created on first insert, sized to the first embedding.
    pub async fn add_texts(
        &self,
        texts: Vec<String>,
        metadatas: Vec<DocumentMetadata>,
    ) -> Result<usize> {
        if texts.len() != metadatas.len() {
            return Err(ToolError::Validation(format!(
                "Got {} texts but {} metadata entries",
                texts.len(),
                metadatas.len()
            )));
        }

        if texts.is_empty() {
            return Ok(0);
        }

        let embeddings = self.embeddings.embed_documents(&texts).await?;

        let documents: Vec<Document> = texts
            .into_iter()
            .zip(metadatas)
            .map(|(text, metadata)| Document { text, metadata })
            .collect();

        let record_batch = SchemaManager::create_record_batch(
            &documents,
            embeddings,
            chrono::Utc::now().timestamp(),
        )?;
        let schema = record_batch.schema();

        let _guard = self.write_lock.lock().await;
        if !self.collection_exists().await? {
            self.connection
                .create_table(
                    &self.collection,
                    RecordBatchIterator::new(vec![Ok(record_batch)], schema),
                )
                .execute()
                .await
                .map_err(|e| ToolError::from_store("create table", e))?;
            info!("Created new collection: {}", self.collection);
        } else {
            self.open_collection()
                .await?
                .add(RecordBatchIterator::new(vec![Ok(record_batch)], schema))
                .execute()
                .await
                .map_err(|e| ToolError::from_store("add rows", e))?;
        }

        debug!(
            "Added {} documents to {}",
            documents.len(),
            self.collection
        );
        Ok(documents.len())
    }

    /// Nearest `k` documents to `query`, closest first.
    pub async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievalMatch>> {
        if !self.collection_exists().await? {
            warn!(
                "Collection {} does not exist, returning empty results",
                self.collection
            );
            return Ok(Vec::new());
        }

        let query_embedding = self.embeddings.embed_query(query).await?;
        let table = self.open_collection().await?;

        let mut results_stream = table
            .vector_search(query_embedding)
            .map_err(|e| ToolError::from_store("vector search", e))?
            .limit(k)
            .execute()
            .await
            .map_err(|e| ToolError::from_store("vector search", e))?;

        let mut matches = Vec::new();
        while let Some(batch_result) = results_stream.next().await {
            let batch = batch_result.map_err(|e| ToolError::from_store("read results", e))?;
            matches.extend(SchemaManager::read_matches(&batch)?);
        }

        matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        matches.truncate(k);

        debug!("Vector search returned {} matches", matches.len());
        Ok(matches)
    }
}
