//! Shared test helpers for the retrieval crate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use studyhall_core::error::ProviderError;
use studyhall_core::provider::{
    EmbeddingRequest, EmbeddingResponse, Provider, ProviderRequest, ProviderResponse,
};

/// A provider that serves scripted embeddings and counts calls.
///
/// Unknown inputs get a fixed fallback vector, so tests that only care about
/// call counts don't need to script anything.
pub struct EmbeddingMockProvider {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    embed_calls: AtomicUsize,
}

impl EmbeddingMockProvider {
    pub fn new() -> Self {
        Self {
            vectors: HashMap::new(),
            fallback: vec![1.0, 1.0, 1.0],
            embed_calls: AtomicUsize::new(0),
        }
    }

    /// Script the embedding for a specific input text.
    pub fn with_vector(mut self, input: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(input.into(), vector);
        self
    }

    /// How many embedding requests this provider has served.
    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for EmbeddingMockProvider {
    fn name(&self) -> &str {
        "embedding_mock"
    }

    async fn complete(
        &self,
        _request: ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::NotConfigured(
            "EmbeddingMockProvider does not serve completions".into(),
        ))
    }

    async fn embed(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, ProviderError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        let embeddings = request
            .inputs
            .iter()
            .map(|input| {
                self.vectors
                    .get(input)
                    .cloned()
                    .unwrap_or_else(|| self.fallback.clone())
            })
            .collect();
        Ok(EmbeddingResponse {
            embeddings,
            model: request.model,
            usage: None,
        })
    }
}
