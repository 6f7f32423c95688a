//! Syllabus Q&A — retrieval-augmented answers over the indexed corpus.
//!
//! The pipeline is deliberately minimal: embed the question, take the top-k
//! documents, splice their bodies into one instruction, send that single
//! message. No conversation history is carried; each question stands alone.

use std::path::Path;
use std::sync::Arc;
use studyhall_core::document::RetrievedDocument;
use studyhall_core::provider::{Provider, ProviderRequest};
use studyhall_retrieval::corpus::PopulationReport;
use studyhall_retrieval::{Retriever, populate};
use tracing::info;

/// An answer grounded in retrieved documents.
#[derive(Debug, Clone)]
pub struct GroundedAnswer {
    /// The generated answer.
    pub answer: String,
    /// Source labels of the documents spliced into the prompt.
    pub sources: Vec<String>,
}

/// Assemble the course-information instruction around retrieved context.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a helpful assistant for course information.\n\
         Use the following retrieved syllabi to answer clearly.\n\
         If you use this info, say \"Based on the syllabi I found...\".\n\n\
         Context:\n{context}\n\n\
         Question: {question}"
    )
}

/// Answers course questions grounded in the document store.
pub struct SyllabusAssistant {
    provider: Arc<dyn Provider>,
    retriever: Retriever,
    model: String,
    temperature: f32,
    chat_top_k: usize,
}

impl SyllabusAssistant {
    pub fn new(
        provider: Arc<dyn Provider>,
        retriever: Retriever,
        model: impl Into<String>,
        temperature: f32,
        chat_top_k: usize,
    ) -> Self {
        Self {
            provider,
            retriever,
            model: model.into(),
            temperature,
            chat_top_k,
        }
    }

    /// Populate the store from the corpus directory.
    ///
    /// Safe to call on every startup: documents already present (by id) are
    /// skipped, so only new files cost an embedding call.
    pub async fn ensure_indexed(
        &self,
        corpus_dir: &Path,
        embedding_model: &str,
    ) -> Result<PopulationReport, studyhall_core::Error> {
        let report = populate(
            self.retriever.store().as_ref(),
            self.provider.as_ref(),
            embedding_model,
            corpus_dir,
        )
        .await?;

        info!(
            embedded = report.embedded.len(),
            skipped = report.skipped.len(),
            "Corpus population complete"
        );
        Ok(report)
    }

    /// Retrieval test: the `top_k` nearest documents for a query, no generation.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, studyhall_core::Error> {
        Ok(self.retriever.query(query, top_k).await?)
    }

    /// Answer a question grounded in the retrieved syllabi.
    pub async fn ask(&self, question: &str) -> Result<GroundedAnswer, studyhall_core::Error> {
        let retrieved = self.retriever.query(question, self.chat_top_k).await?;

        let context = retrieved
            .iter()
            .map(|doc| doc.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let sources = retrieved.iter().map(|doc| doc.source.clone()).collect();

        let prompt = build_prompt(&context, question);

        info!(
            model = %self.model,
            documents = retrieved.len(),
            "Generating grounded answer"
        );

        // The assembled instruction is the entire request — no history.
        let request =
            ProviderRequest::single(&self.model, prompt).with_temperature(self.temperature);
        let response = self.provider.complete(request).await?;

        Ok(GroundedAnswer {
            answer: response.message.content,
            sources,
        })
    }
}
