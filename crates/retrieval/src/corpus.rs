//! Corpus population — loading source documents into the store.
//!
//! Population is idempotent: each source file becomes one record keyed by its
//! file name, and files whose id is already present are skipped, so re-running
//! is safe. Text extraction from richer formats (PDF etc.) happens upstream;
//! the corpus directory holds plain-text documents.

use std::path::Path;
use studyhall_core::document::{DocumentRecord, DocumentStore};
use studyhall_core::error::RetrievalError;
use studyhall_core::provider::{EmbeddingRequest, Provider};
use tracing::{debug, info};

/// Extensions accepted as corpus documents.
const CORPUS_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// What a population run did.
#[derive(Debug, Clone, Default)]
pub struct PopulationReport {
    /// Documents embedded and inserted by this run.
    pub embedded: Vec<String>,
    /// Documents already present and left untouched.
    pub skipped: Vec<String>,
}

impl PopulationReport {
    pub fn total(&self) -> usize {
        self.embedded.len() + self.skipped.len()
    }
}

/// Populate the store from a directory of plain-text documents.
///
/// For each `.txt`/`.md` file not already present in the store (by id = file
/// name): read the text, embed it, insert the record. Present ids are
/// skipped. Files that cannot be read or that are empty after trimming are
/// ignored with a log line, matching the tolerant per-file handling of the
/// population path.
pub async fn populate(
    store: &dyn DocumentStore,
    provider: &dyn Provider,
    embedding_model: &str,
    corpus_dir: &Path,
) -> Result<PopulationReport, RetrievalError> {
    let entries = std::fs::read_dir(corpus_dir).map_err(|e| RetrievalError::SourceUnreadable {
        path: corpus_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| CORPUS_EXTENSIONS.contains(&ext))
        })
        .collect();
    files.sort();

    let mut report = PopulationReport::default();

    for path in files {
        let id = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        if store.contains(&id).await? {
            debug!(id = %id, "Document already indexed, skipping");
            report.skipped.push(id);
            continue;
        }

        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => {
                info!(id = %id, error = %e, "Skipping unreadable source document");
                continue;
            }
        };

        if text.trim().is_empty() {
            info!(id = %id, "Skipping empty source document");
            continue;
        }

        let embedding = embed_one(provider, embedding_model, &text).await?;

        store
            .insert(DocumentRecord::new(&id, text, &id, Some(embedding)))
            .await?;

        info!(id = %id, "Embedded document");
        report.embedded.push(id);
    }

    Ok(report)
}

/// Embed a single text through the provider.
pub(crate) async fn embed_one(
    provider: &dyn Provider,
    model: &str,
    text: &str,
) -> Result<Vec<f32>, RetrievalError> {
    let response = provider
        .embed(EmbeddingRequest {
            model: model.into(),
            inputs: vec![text.into()],
        })
        .await
        .map_err(|e| RetrievalError::EmbeddingFailed(e.to_string()))?;

    response
        .embeddings
        .into_iter()
        .next()
        .ok_or_else(|| RetrievalError::EmbeddingFailed("Provider returned no embedding".into()))
}
