//! Retriever — embeds a query and returns the nearest documents.
//!
//! The retriever is the only path assistants use to reach the store: it
//! adapts the provider's embedding payload and the store's ranking into the
//! stable [`RetrievedDocument`] contract. No caching, no re-ranking, no dedup.

use crate::corpus::embed_one;
use std::sync::Arc;
use studyhall_core::document::{DocumentStore, RetrievedDocument};
use studyhall_core::error::RetrievalError;
use studyhall_core::provider::Provider;
use tracing::debug;

/// Wraps an embedding provider and a document store for similarity queries.
pub struct Retriever {
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn Provider>,
    embedding_model: String,
}

impl Retriever {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn Provider>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            provider,
            embedding_model: embedding_model.into(),
        }
    }

    /// Return the `top_k` documents nearest to the query text, with source labels.
    pub async fn query(
        &self,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
        let embedding = embed_one(self.provider.as_ref(), &self.embedding_model, text).await?;
        let results = self.store.query_similar(&embedding, top_k).await?;
        debug!(query = %text, results = results.len(), "Retrieval query");
        Ok(results)
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryStore;
    use crate::test_util::EmbeddingMockProvider;
    use studyhall_core::document::{DocumentRecord, DocumentStore};

    async fn seeded_store() -> Arc<dyn DocumentStore> {
        let store = InMemoryStore::new();
        store
            .insert(DocumentRecord::new(
                "ml.txt",
                "Machine learning fundamentals.",
                "ml.txt",
                Some(vec![1.0, 0.0, 0.0]),
            ))
            .await
            .unwrap();
        store
            .insert(DocumentRecord::new(
                "db.txt",
                "Relational database design.",
                "db.txt",
                Some(vec![0.0, 1.0, 0.0]),
            ))
            .await
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn query_returns_top_k_with_sources() {
        let store = seeded_store().await;
        let provider = Arc::new(
            EmbeddingMockProvider::new().with_vector("machine learning", vec![1.0, 0.0, 0.0]),
        );
        let retriever = Retriever::new(store, provider, "text-embedding-3-small");

        let results = retriever.query("machine learning", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "ml.txt");
        assert_eq!(results[0].source, "ml.txt");
        assert!(results[0].score > 0.9);
    }

    #[tokio::test]
    async fn query_respects_top_k() {
        let store = seeded_store().await;
        let provider = Arc::new(EmbeddingMockProvider::new());
        let retriever = Retriever::new(store, provider, "m");

        let results = retriever.query("anything", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }
}
