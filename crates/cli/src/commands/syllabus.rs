//! `studyhall syllabus` — Corpus indexing, retrieval test, and RAG chat.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use studyhall_assistants::SyllabusAssistant;
use studyhall_config::{AppConfig, ModelTier};
use studyhall_core::document::DocumentStore;
use studyhall_retrieval::corpus::PopulationReport;
use studyhall_retrieval::{FileStore, Retriever};
use tokio::io::{AsyncBufReadExt, BufReader};

fn build_assistant(config: &AppConfig) -> SyllabusAssistant {
    let provider = studyhall_providers::build_from_config(config);
    let store: Arc<dyn DocumentStore> = Arc::new(FileStore::new(config.store_path()));
    let retriever = Retriever::new(store, provider.clone(), &config.retrieval.embedding_model);
    SyllabusAssistant::new(
        provider,
        retriever,
        config.model_for(ModelTier::Standard),
        config.default_temperature,
        config.retrieval.chat_top_k,
    )
}

/// Populate the collection before any retrieval; idempotent, so every command
/// runs it first. Newly embedded documents are reported as they land.
async fn ensure_indexed(
    assistant: &SyllabusAssistant,
    config: &AppConfig,
) -> Result<PopulationReport, Box<dyn std::error::Error>> {
    let corpus_dir = PathBuf::from(&config.retrieval.corpus_dir);
    if !corpus_dir.is_dir() {
        return Err(format!(
            "Corpus directory '{}' not found — create it and add .txt/.md documents",
            corpus_dir.display()
        )
        .into());
    }

    let report = assistant
        .ensure_indexed(&corpus_dir, &config.retrieval.embedding_model)
        .await?;

    for id in &report.embedded {
        println!("  ✅ Embedded: {id}");
    }
    Ok(report)
}

pub async fn index() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let assistant = build_assistant(&config);

    println!("📚 Indexing corpus from '{}'", config.retrieval.corpus_dir);
    println!();

    let report = ensure_indexed(&assistant, &config).await?;
    for id in &report.skipped {
        println!("  ⏭  Already indexed: {id}");
    }

    println!();
    println!(
        "  {} document(s) in the collection ({} new)",
        report.total(),
        report.embedded.len()
    );

    Ok(())
}

pub async fn search(query: String, top_k: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let assistant = build_assistant(&config);
    ensure_indexed(&assistant, &config).await?;

    let top_k = top_k.unwrap_or(config.retrieval.search_top_k);
    let results = assistant.search(&query, top_k).await?;

    println!();
    println!("🔍 Top {top_k} results for \"{query}\"");
    println!();
    if results.is_empty() {
        println!("  (no documents indexed)");
    }
    for (idx, doc) in results.iter().enumerate() {
        println!("  {}. {} (score {:.3})", idx + 1, doc.source, doc.score);
    }

    Ok(())
}

pub async fn chat() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let assistant = build_assistant(&config);
    ensure_indexed(&assistant, &config).await?;

    println!();
    println!("💬 Syllabus chat — ask me about the courses.");
    println!("   Type 'exit' or Ctrl+C to quit.");
    println!();

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim().to_string();
        if input.is_empty() {
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }

        if matches!(input.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        eprint!("  ...");
        match assistant.ask(&input).await {
            Ok(answer) => {
                eprint!("\r     \r");
                println!();
                for line in answer.answer.lines() {
                    println!("  Assistant > {line}");
                }
                println!();
                println!("  📂 Sources used:");
                for source in &answer.sources {
                    println!("     - {source}");
                }
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}
