//! Document store trait — the embedded vector-search collaborator.
//!
//! The store owns the document records (id, text, source label, embedding).
//! Similarity queries return a stable [`RetrievedDocument`] contract; external
//! payload shapes are adapted to it at the store boundary, never leaked to
//! the assistants.

use crate::error::RetrievalError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique ID for this document (the source file name for corpus documents)
    pub id: String,

    /// The full extracted text
    pub text: String,

    /// Human-readable source label (shown alongside answers)
    pub source: String,

    /// Embedding vector. Persisted with the record — the store *is* the
    /// vector index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// When this document was indexed
    pub indexed_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
        embedding: Option<Vec<f32>>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source: source.into(),
            embedding,
            indexed_at: Utc::now(),
        }
    }
}

/// A document returned from a similarity query.
///
/// This is the stable contract at the retrieval boundary: assistants consume
/// this type and nothing else about the underlying store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// The stored document's ID
    pub id: String,

    /// Source label for citation
    pub source: String,

    /// The document body
    pub text: String,

    /// Similarity score (higher = closer), as ranked by the store
    pub score: f32,
}

/// The core DocumentStore trait.
///
/// Implementations: in-memory (tests, ephemeral sessions), JSONL file
/// (persistent collection).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The store name (e.g., "in_memory", "file").
    fn name(&self) -> &str;

    /// Insert a document. Returns the stored ID.
    async fn insert(&self, record: DocumentRecord) -> std::result::Result<String, RetrievalError>;

    /// Whether a document with this ID is already present.
    async fn contains(&self, id: &str) -> std::result::Result<bool, RetrievalError>;

    /// Get a document by ID.
    async fn get(&self, id: &str) -> std::result::Result<Option<DocumentRecord>, RetrievalError>;

    /// Return the `top_k` documents nearest to the query embedding,
    /// ranked by the store's similarity metric.
    async fn query_similar(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> std::result::Result<Vec<RetrievedDocument>, RetrievalError>;

    /// All stored document IDs.
    async fn ids(&self) -> std::result::Result<Vec<String>, RetrievalError>;

    /// Total document count.
    async fn count(&self) -> std::result::Result<usize, RetrievalError>;

    /// Remove all documents.
    async fn clear(&self) -> std::result::Result<(), RetrievalError>;
}
