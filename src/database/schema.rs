// file: src/database/schema.rs
// description: LanceDB schema and record batch conversion for the knowledge base
// reference: https://docs.rs/lancedb

use crate::error::{Result, ToolError};
use crate::models::{Document, DocumentMetadata, RetrievalMatch};
use arrow_array::types::Float32Type;
use arrow_array::{
    Array, FixedSizeListArray, Float32Array, Int64Array, RecordBatch, StringArray,
};
use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

pub struct SchemaManager;

impl SchemaManager {
    /// Returns the Arrow schema for a collection with `embedding_dim` wide vectors
    pub fn collection_schema(embedding_dim: usize) -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("text", DataType::Utf8, false),
            Field::new("source", DataType::Utf8, false),
            // JSON array of image URLs
            Field::new("images", DataType::Utf8, false),
            Field::new("upserted_at", DataType::Int64, false),
            Field::new(
                "vector",
                DataType::FixedSizeList(
                    Arc::new(Field::new("item", DataType::Float32, true)),
                    embedding_dim as i32,
                ),
                true,
            ),
        ]))
    }

    pub fn create_record_batch(
        documents: &[Document],
        embeddings: Vec<Vec<f32>>,
        upserted_at: i64,
    ) -> Result<RecordBatch> {
        if documents.len() != embeddings.len() {
            return Err(ToolError::Database(format!(
                "Got {} embeddings for {} documents",
                embeddings.len(),
                documents.len()
            )));
        }

        let dim = embeddings.first().map(Vec::len).ok_or_else(|| {
            ToolError::Database("Cannot build a record batch without documents".to_string())
        })?;

        if embeddings.iter().any(|e| e.len() != dim) {
            return Err(ToolError::Database(
                "Embeddings have inconsistent dimensions".to_string(),
            ));
        }

        let ids: StringArray = documents.iter().map(|doc| Some(doc.id())).collect();
        let texts: StringArray = documents.iter().map(|doc| Some(doc.text.clone())).collect();
        let sources: StringArray = documents
            .iter()
            .map(|doc| Some(doc.metadata.source.clone()))
            .collect();

        let images = documents
            .iter()
            .map(|doc| serde_json::to_string(&doc.metadata.images).map(Some))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let images: StringArray = images.into_iter().collect();

        let upserted: Int64Array = documents.iter().map(|_| Some(upserted_at)).collect();

        let vectors = FixedSizeListArray::from_iter_primitive::<Float32Type, _, _>(
            embeddings
                .into_iter()
                .map(|emb| Some(emb.into_iter().map(Some).collect::<Vec<_>>())),
            dim as i32,
        );

        RecordBatch::try_new(
            Self::collection_schema(dim),
            vec![
                Arc::new(ids),
                Arc::new(texts),
                Arc::new(sources),
                Arc::new(images),
                Arc::new(upserted),
                Arc::new(vectors),
            ],
        )
        .map_err(|e| ToolError::Database(format!("Failed to create record batch: {}", e)))
    }

    /// Convert a search result batch back into matches. LanceDB reports the
    /// distance in the `_distance` column.
    pub fn read_matches(batch: &RecordBatch) -> Result<Vec<RetrievalMatch>> {
        let texts = string_column(batch, "text")?;
        let sources = string_column(batch, "source")?;
        let images = string_column(batch, "images")?;

        let distances = batch
            .column_by_name("_distance")
            .ok_or_else(|| ToolError::Database("Missing '_distance' column".to_string()))?
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| ToolError::Database("Invalid '_distance' column type".to_string()))?;

        let mut matches = Vec::with_capacity(batch.num_rows());
        for i in 0..batch.num_rows() {
            let images: Vec<String> = serde_json::from_str(images.value(i))?;

            matches.push(RetrievalMatch {
                document: Document {
                    text: texts.value(i).to_string(),
                    metadata: DocumentMetadata {
                        source: sources.value(i).to_string(),
                        images,
                    },
                },
                score: if distances.is_null(i) {
                    f32::MAX
                } else {
                    distances.value(i)
                },
            });
        }

        Ok(matches)
    }
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ToolError::Database(format!("Missing '{}' column", name)))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| ToolError::Database(format!("Invalid '{}' column type", name)))
}
