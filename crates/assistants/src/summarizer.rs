//! Document summarizer — one instruction, one summary.
//!
//! The whole uploaded document plus a style directive is embedded in a single
//! instruction string; the assembled message is the entire request.

use std::sync::Arc;
use studyhall_core::provider::{Provider, ProviderRequest};
use tracing::info;

/// The three fixed summary presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    /// "Summarize in 100 words"
    HundredWords,
    /// "Summarize in 2 connecting paragraphs"
    TwoParagraphs,
    /// "Summarize in 5 bullet points"
    FiveBullets,
}

impl SummaryStyle {
    /// The literal task directive embedded in the instruction.
    pub fn directive(&self) -> &'static str {
        match self {
            SummaryStyle::HundredWords => "Summarize in 100 words",
            SummaryStyle::TwoParagraphs => "Summarize in 2 connecting paragraphs",
            SummaryStyle::FiveBullets => "Summarize in 5 bullet points",
        }
    }
}

/// Assemble the summarization instruction.
///
/// Pure string templating: the document text and the chosen directive both
/// appear literally in the result.
pub fn build_instructions(document: &str, style: SummaryStyle) -> String {
    format!(
        "You are a helpful assistant. Summarize the document as per the chosen style.\n\n\
         Document:\n{document}\n\n\
         Task:\n{}",
        style.directive()
    )
}

/// Summarizes documents through the configured provider.
pub struct Summarizer {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    /// Summarize a document in the chosen style.
    pub async fn run(
        &self,
        document: &str,
        style: SummaryStyle,
    ) -> Result<String, studyhall_core::Error> {
        let instructions = build_instructions(document, style);

        info!(model = %self.model, style = ?style, "Generating summary");

        let request = ProviderRequest::single(&self.model, instructions)
            .with_temperature(self.temperature);
        let response = self.provider.complete(request).await?;

        Ok(response.message.content)
    }
}
