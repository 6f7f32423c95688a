//! `studyhall tutor` — Interactive two-phase Q&A chat.

use std::io::Write;
use studyhall_assistants::{Tutor, TutorSession};
use studyhall_config::{AppConfig, ModelTier};
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(advanced: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;

    let tier = if advanced {
        ModelTier::Advanced
    } else {
        ModelTier::Standard
    };
    let model = config.model_for(tier).to_string();

    let provider = studyhall_providers::build_from_config(&config);
    let tutor = Tutor::new(provider, &model, config.default_temperature);
    let mut session = TutorSession::new(config.chat.buffer_cap);

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Studyhall Tutor — Interactive Mode    ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:   {model}");
    println!("  Buffer:  last {} messages", config.chat.buffer_cap);
    println!();
    println!("  Ask me a question! I'll explain it simply, then offer more info.");
    println!("  Type 'exit' or Ctrl+C to quit.");
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

        print!("\n  Tutor > ");
        std::io::stdout().flush()?;

        // Stream the reply as it arrives; the session only commits the turn
        // once the stream is fully consumed.
        let result = tutor
            .take_turn(&mut session, &input, |delta| {
                print!("{delta}");
                let _ = std::io::stdout().flush();
            })
            .await;

        match result {
            Ok(_) => {
                println!();
                println!();
            }
            Err(e) => {
                println!();
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
