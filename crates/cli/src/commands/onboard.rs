//! `studyhall onboard` — First-time setup.

use studyhall_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");
    let library_dir = AppConfig::library_dir();

    println!("📚 Studyhall — First-Time Setup");
    println!("===============================\n");

    // Create directories
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if !library_dir.exists() {
        std::fs::create_dir_all(&library_dir)?;
        println!("✅ Created library directory: {}", library_dir.display());
    }

    // Create config file
    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        let default_toml = AppConfig::default_toml();
        std::fs::write(&config_path, &default_toml)?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Edit {} and add your API keys", config_path.display());
        println!("      (api_key for the LLM, weather_api_key for the wardrobe advisor)");
        println!("   2. Put course documents (.txt/.md) in a `corpus/` directory");
        println!("   3. Run: studyhall tutor\n");
    }

    println!("🎉 Setup complete!\n");

    Ok(())
}
