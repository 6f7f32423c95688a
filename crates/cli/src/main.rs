//! Studyhall CLI — the main entry point.
//!
//! Commands:
//! - `onboard`   — Initialize config & library directories
//! - `summarize` — Summarize a document in a chosen style
//! - `tutor`     — Interactive two-phase Q&A chatbot
//! - `syllabus`  — Index, search, and chat over course documents
//! - `wardrobe`  — Weather-based clothing and picnic advice
//! - `doctor`    — Diagnose configuration and connectivity

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use studyhall_assistants::SummaryStyle;

mod commands;

#[derive(Parser)]
#[command(
    name = "studyhall",
    about = "Studyhall — AI study companion toolkit",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and library directories
    Onboard,

    /// Summarize a document (.txt or .md)
    Summarize {
        /// The document to summarize
        file: PathBuf,

        /// Summary style preset
        #[arg(short, long, value_enum, default_value_t = StyleArg::HundredWords)]
        style: StyleArg,

        /// Use the advanced model tier
        #[arg(long)]
        advanced: bool,
    },

    /// Chat with the tutor (answers simply, then offers more info)
    Tutor {
        /// Use the advanced model tier
        #[arg(long)]
        advanced: bool,
    },

    /// Work with the indexed course documents
    Syllabus {
        #[command(subcommand)]
        command: SyllabusCommands,
    },

    /// Get clothing and picnic advice for a city's current weather
    Wardrobe {
        /// City to check (defaults to the configured city)
        city: Option<String>,

        /// Use the advanced model tier
        #[arg(long)]
        advanced: bool,
    },

    /// Diagnose configuration and connectivity
    Doctor,
}

#[derive(Subcommand)]
enum SyllabusCommands {
    /// Embed new corpus documents into the collection
    Index,

    /// Retrieval test: show the nearest documents for a query
    Search {
        /// The query text
        query: String,

        /// How many documents to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Interactive retrieval-augmented chat
    Chat,
}

/// CLI surface of the three fixed summary presets.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    /// Summarize in 100 words
    HundredWords,
    /// Summarize in 2 connecting paragraphs
    TwoParagraphs,
    /// Summarize in 5 bullet points
    FiveBullets,
}

impl std::fmt::Display for StyleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StyleArg::HundredWords => "hundred-words",
            StyleArg::TwoParagraphs => "two-paragraphs",
            StyleArg::FiveBullets => "five-bullets",
        };
        write!(f, "{name}")
    }
}

impl From<StyleArg> for SummaryStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::HundredWords => SummaryStyle::HundredWords,
            StyleArg::TwoParagraphs => SummaryStyle::TwoParagraphs,
            StyleArg::FiveBullets => SummaryStyle::FiveBullets,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Summarize {
            file,
            style,
            advanced,
        } => commands::summarize::run(file, style.into(), advanced).await?,
        Commands::Tutor { advanced } => commands::tutor::run(advanced).await?,
        Commands::Syllabus { command } => match command {
            SyllabusCommands::Index => commands::syllabus::index().await?,
            SyllabusCommands::Search { query, top_k } => {
                commands::syllabus::search(query, top_k).await?
            }
            SyllabusCommands::Chat => commands::syllabus::chat().await?,
        },
        Commands::Wardrobe { city, advanced } => commands::wardrobe::run(city, advanced).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
