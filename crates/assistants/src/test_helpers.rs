//! Shared test helpers for assistant tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use studyhall_core::error::ProviderError;
use studyhall_core::message::Message;
use studyhall_core::provider::{
    EmbeddingRequest, EmbeddingResponse, Provider, ProviderRequest, ProviderResponse, Usage,
};

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next response in the queue and records
/// the request it was given. Panics if more calls are made than responses
/// provided. Also serves embeddings (scripted per input text, with a fixed
/// fallback) so retrieval-backed assistants can run against it.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<ProviderResponse>>,
    call_count: Mutex<usize>,
    last_request: Mutex<Option<ProviderRequest>>,
    query_vectors: HashMap<String, Vec<f32>>,
    fail: bool,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
            last_request: Mutex::new(None),
            query_vectors: HashMap::new(),
            fail: false,
        }
    }

    /// Create a provider that returns a single text response.
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![make_text_response(text)])
    }

    /// Create a provider whose every call fails with a network error.
    pub fn failing() -> Self {
        let mut provider = Self::new(vec![]);
        provider.fail = true;
        provider
    }

    /// Script the embedding returned for a specific input text.
    pub fn with_query_vector(mut self, input: impl Into<String>, vector: Vec<f32>) -> Self {
        self.query_vectors.insert(input.into(), vector);
        self
    }

    /// How many completion requests this provider has served.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The most recent completion request, if any.
    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        if self.fail {
            return Err(ProviderError::Network("scripted failure".into()));
        }

        *self.last_request.lock().unwrap() = Some(request);

        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        if *count >= responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                *count,
                responses.len()
            );
        }

        let response = responses[*count].clone();
        *count += 1;
        Ok(response)
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
        if self.fail {
            return Err(ProviderError::Network("scripted failure".into()));
        }

        let embeddings = request
            .inputs
            .iter()
            .map(|input| {
                self.query_vectors
                    .get(input)
                    .cloned()
                    .unwrap_or_else(|| vec![1.0, 1.0])
            })
            .collect();

        Ok(EmbeddingResponse {
            embeddings,
            model: request.model,
            usage: None,
        })
    }
}

/// Create a simple text response.
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}
