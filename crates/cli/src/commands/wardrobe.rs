//! `studyhall wardrobe` — Weather-based clothing and picnic advice.

use studyhall_assistants::WardrobeAdvisor;
use studyhall_config::{AppConfig, ModelTier};
use studyhall_weather::OpenWeatherClient;

pub async fn run(city: Option<String>, advanced: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    super::require_api_key(&config)?;
    super::require_weather_api_key(&config)?;

    // Blank input falls back to the configured city
    let city = match city {
        Some(c) if !c.trim().is_empty() => c,
        _ => config.weather.default_city.clone(),
    };

    let tier = if advanced {
        ModelTier::Advanced
    } else {
        ModelTier::Standard
    };
    let model = config.model_for(tier);

    let provider = studyhall_providers::build_from_config(&config);
    let weather_key = config.weather_api_key.clone().unwrap_or_default();
    let weather = OpenWeatherClient::new(&config.weather.api_url, weather_key);
    let advisor = WardrobeAdvisor::new(provider, weather, model, config.default_temperature);

    eprint!("  Checking the weather...");
    let advice = advisor.advise(&city).await?;
    eprint!("\r                        \r");

    println!();
    println!("🌍 Weather in {}", advice.report.location);
    println!("{}", serde_json::to_string_pretty(&advice.report)?);
    println!();
    println!("👕 Clothing & Picnic Advice");
    println!();
    println!("{}", advice.advice);

    Ok(())
}
