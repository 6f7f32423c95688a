//! LLM provider implementations for Studyhall.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use std::sync::Arc;
use studyhall_core::provider::Provider;

/// Build the configured provider.
///
/// The suite talks to a single OpenAI-compatible endpoint; the base URL is a
/// config knob so self-hosted compatible servers work too.
pub fn build_from_config(config: &studyhall_config::AppConfig) -> Arc<dyn Provider> {
    let api_key = config.api_key.clone().unwrap_or_default();
    Arc::new(OpenAiCompatProvider::new(
        "openai",
        &config.api_url,
        api_key,
    ))
}
