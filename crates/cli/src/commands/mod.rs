//! CLI command implementations.

pub mod doctor;
pub mod onboard;
pub mod summarize;
pub mod syllabus;
pub mod tutor;
pub mod wardrobe;

use studyhall_config::AppConfig;

/// Refuse to proceed without an LLM API key — give a clear error.
pub fn require_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.has_api_key() {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    export OPENAI_API_KEY='sk-...'");
    eprintln!("    export STUDYHALL_API_KEY='sk-...'   (generic)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
    Err("No API key found. See above for setup instructions.".into())
}

/// Refuse to proceed without a weather API key.
pub fn require_weather_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.has_weather_api_key() {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No weather API key configured!");
    eprintln!();
    eprintln!("  Set the environment variable:");
    eprintln!("    export OPENWEATHER_API_KEY='...'");
    eprintln!();
    eprintln!("  Or add weather_api_key to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
    Err("No weather API key found. See above for setup instructions.".into())
}
