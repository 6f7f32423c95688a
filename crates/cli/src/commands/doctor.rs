//! `studyhall doctor` — Diagnose configuration and connectivity.

use studyhall_config::AppConfig;
use studyhall_core::Provider as _;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Studyhall Doctor — Diagnostics");
    println!("=================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let mut loaded = None;
    if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                loaded = Some(config);
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
            }
        }
    } else {
        // Env-only setups still work; load defaults + env overrides
        println!("  ⚠️  No config file — run `studyhall onboard` (env vars still apply)");
        loaded = AppConfig::load().ok();
        issues += 1;
    }

    if let Some(config) = loaded {
        // Check API keys
        if config.has_api_key() {
            println!("  ✅ LLM API key configured");

            // Can we reach the provider?
            let provider = studyhall_providers::build_from_config(&config);
            match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider reachable"),
                Ok(false) => {
                    println!("  ⚠️  Provider responded with an error status");
                    issues += 1;
                }
                Err(e) => {
                    println!("  ⚠️  Provider unreachable: {e}");
                    issues += 1;
                }
            }
        } else {
            println!("  ⚠️  No LLM API key — set OPENAI_API_KEY or add api_key to config.toml");
            issues += 1;
        }

        if config.has_weather_api_key() {
            println!("  ✅ Weather API key configured");
        } else {
            println!("  ⚠️  No weather API key — the wardrobe advisor won't work");
            issues += 1;
        }

        // Check document collection
        let store_path = config.store_path();
        if store_path.exists() {
            println!("  ✅ Document collection exists: {}", store_path.display());
        } else {
            println!("  ⚠️  No document collection yet — run `studyhall syllabus index`");
        }

        // Check corpus directory
        let corpus_dir = std::path::Path::new(&config.retrieval.corpus_dir);
        if corpus_dir.is_dir() {
            println!("  ✅ Corpus directory exists: {}", corpus_dir.display());
        } else {
            println!(
                "  ⚠️  Corpus directory '{}' not found",
                config.retrieval.corpus_dir
            );
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
