//! In-memory store — useful for testing and ephemeral sessions.

use crate::vector::rank_documents;
use async_trait::async_trait;
use std::sync::Arc;
use studyhall_core::document::{DocumentRecord, DocumentStore, RetrievedDocument};
use studyhall_core::error::RetrievalError;
use tokio::sync::RwLock;
use uuid::Uuid;

/// An in-memory store that keeps document records in a Vec.
/// Useful for testing and sessions where persistence isn't needed.
pub struct InMemoryStore {
    records: Arc<RwLock<Vec<DocumentRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn insert(&self, mut record: DocumentRecord) -> Result<String, RetrievalError> {
        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        let id = record.id.clone();
        self.records.write().await.push(record);
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
        Ok(())
    }
}
