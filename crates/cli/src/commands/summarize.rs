//! `studyhall summarize` — Document summarizer.

use std::path::PathBuf;
use studyhall_assistants::{Summarizer, SummaryStyle};
use studyhall_config::{AppConfig, ModelTier};

pub async fn run(
    file: PathBuf,
    style: SummaryStyle,
    advanced: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let extension = file.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    if !matches!(extension, "txt" | "md") {
        return Err(format!(
            "Unsupported document type '.{extension}' — upload a .txt or .md file"
        )
        .into());
    }

    let document = std::fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;

    let tier = if advanced {
        ModelTier::Advanced
    } else {
        ModelTier::Standard
    };
    let model = config.model_for(tier);

    println!("📌 Model in use: {model}");

    let provider = studyhall_providers::build_from_config(&config);
    let summarizer = Summarizer::new(provider, model, config.default_temperature);

    eprint!("  Generating summary...");
    let summary = summarizer.run(&document, style).await?;
    eprint!("\r                      \r");

    println!();
    println!("📌 Summary ({})", style.directive());
    println!();
    println!("{summary}");

    Ok(())
}
