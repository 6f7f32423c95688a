//! File-based store — persistent JSONL document collection.
//!
//! Each line is a JSON-encoded `DocumentRecord`, embedding included: the file
//! is the whole vector index. Records are loaded into memory on creation and
//! flushed to disk on every mutation, giving fast reads with durable writes.
//!
//! Storage location: `~/.studyhall/library/documents.jsonl`

use crate::vector::rank_documents;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use studyhall_core::document::{DocumentRecord, DocumentStore, RetrievedDocument};
use studyhall_core::error::RetrievalError;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// A file-backed document store using JSONL (one JSON object per line).
pub struct FileStore {
    path: PathBuf,
    records: Arc<RwLock<Vec<DocumentRecord>>>,
}

impl FileStore {
    /// Create a new file-based store at the given path.
    ///
    /// If the file exists, records are loaded from it.
    /// If the file does not exist, starts empty (file created on first write).
    pub fn new(path: PathBuf) -> Self {
        let records = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = records.len(), "File document store loaded");
        Self {
            path,
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Load records from a JSONL file.
    fn load_from_disk(path: &PathBuf) -> Vec<DocumentRecord> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // File doesn't exist yet — start empty
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<DocumentRecord>(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted document record");
                    None
                }
            })
            .collect()
    }

    /// Flush all records to disk as JSONL.
    async fn flush(&self) -> Result<(), RetrievalError> {
        let records = self.records.read().await;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RetrievalError::Storage(format!("Failed to create library directory: {e}"))
            })?;
        }

        let mut content = String::new();
        for record in records.iter() {
            let line = serde_json::to_string(record).map_err(|e| {
                RetrievalError::Storage(format!("Failed to serialize document record: {e}"))
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content)
            .map_err(|e| RetrievalError::Storage(format!("Failed to write document file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn insert(&self, mut record: DocumentRecord) -> Result<String, RetrievalError> {
        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        let id = record.id.clone();
        self.records.write().await.push(record);
        self.flush().await?;
        Ok(id)
    }

    async fn contains(&self, id: &str) -> Result<bool, RetrievalError> {
        Ok(self.records.read().await.iter().any(|r| r.id == id))
    }

    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>, RetrievalError> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn query_similar(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
        let records = self.records.read().await;
        Ok(rank_documents(&records, embedding, top_k))
    }

    async fn ids(&self) -> Result<Vec<String>, RetrievalError> {
        Ok(self.records.read().await.iter().map(|r| r.id.clone()).collect())
    }

    async fn count(&self) -> Result<usize, RetrievalError> {
        Ok(self.records.read().await.len())
    }

    async fn clear(&self) -> Result<(), RetrievalError> {
        self.records.write().await.clear();
        self.flush().await?;
        Ok(())
    }
}
