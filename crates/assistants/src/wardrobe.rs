//! Wardrobe advisor — fetch → convert → template → request.
//!
//! Fetches current conditions for a city, templates them into an advice
//! prompt, and asks the model what to wear and whether it's picnic weather.

use std::sync::Arc;
use studyhall_core::provider::{Provider, ProviderRequest};
use studyhall_weather::{OpenWeatherClient, WeatherReport};
use tracing::info;

/// The weather report and the generated advice.
#[derive(Debug, Clone)]
pub struct WardrobeAdvice {
    pub report: WeatherReport,
    pub advice: String,
}

/// Template the weather fields into the advice prompt.
pub fn build_prompt(report: &WeatherReport) -> String {
    format!(
        "The current weather for {} is:\n\
         - Temperature: {} °C\n\
         - Feels Like: {} °C\n\
         - Min: {} °C\n\
         - Max: {} °C\n\
         - Humidity: {} %\n\
         - Conditions: {}\n\n\
         Based on this weather:\n\
         1. Suggest what clothes someone should wear today.\n\
         2. Say if it's a good day for a picnic (yes/no with reasoning).\n\
         Please keep your answer simple enough for a 10-year-old to understand.",
        report.location,
        report.temperature,
        report.feels_like,
        report.temp_min,
        report.temp_max,
        report.humidity,
        report.description
    )
}

/// Turns current conditions into clothing and picnic advice.
pub struct WardrobeAdvisor {
    provider: Arc<dyn Provider>,
    weather: OpenWeatherClient,
    model: String,
    temperature: f32,
}

impl WardrobeAdvisor {
    pub fn new(
        provider: Arc<dyn Provider>,
        weather: OpenWeatherClient,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            weather,
            model: model.into(),
            temperature,
        }
    }

    /// Fetch the weather for a city and generate advice.
    ///
    /// A weather failure aborts the pipeline before any model call.
    pub async fn advise(&self, city: &str) -> Result<WardrobeAdvice, studyhall_core::Error> {
        let report = self.weather.current(city).await?;
        self.advise_for(report).await
    }

    /// Generate advice for an already-fetched report.
    pub async fn advise_for(
        &self,
        report: WeatherReport,
    ) -> Result<WardrobeAdvice, studyhall_core::Error> {
        let prompt = build_prompt(&report);

        info!(city = %report.location, model = %self.model, "Generating wardrobe advice");

        let request =
            ProviderRequest::single(&self.model, prompt).with_temperature(self.temperature);
        let response = self.provider.complete(request).await?;

        Ok(WardrobeAdvice {
            report,
            advice: response.message.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SequentialMockProvider;

    fn report() -> WeatherReport {
        WeatherReport {
            location: "Syracuse".into(),
            temperature: 3.42,
            feels_like: 0.87,
            temp_min: -1.15,
            temp_max: 5.0,
            humidity: 74.0,
            description: "Light snow".into(),
        }
    }

    #[test]
    fn prompt_templates_all_fields() {
        let prompt = build_prompt(&report());
        assert!(prompt.contains("Syracuse"));
        assert!(prompt.contains("- Temperature: 3.42 °C"));
        assert!(prompt.contains("- Feels Like: 0.87 °C"));
        assert!(prompt.contains("- Min: -1.15 °C"));
        assert!(prompt.contains("- Max: 5 °C"));
        assert!(prompt.contains("- Humidity: 74 %"));
        assert!(prompt.contains("Light snow"));
        assert!(prompt.contains("picnic"));
    }

    #[tokio::test]
    async fn advice_carries_report_and_answer() {
        let provider = Arc::new(SequentialMockProvider::single_text(
            "Wear a warm coat. Not a picnic day.",
        ));
        let advisor = WardrobeAdvisor::new(
            provider.clone(),
            OpenWeatherClient::new("https://api.openweathermap.org/data/2.5", "test-key"),
            "mock-model",
            0.7,
        );

        let advice = advisor.advise_for(report()).await.unwrap();
        assert_eq!(advice.advice, "Wear a warm coat. Not a picnic day.");
        assert_eq!(advice.report.location, "Syracuse");

        let sent = provider.last_request().unwrap();
        assert!(sent.messages[0].content.contains("Light snow"));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(SequentialMockProvider::failing());
        let advisor = WardrobeAdvisor::new(
            provider,
            OpenWeatherClient::new("https://api.openweathermap.org/data/2.5", "test-key"),
            "mock-model",
            0.7,
        );

        assert!(advisor.advise_for(report()).await.is_err());
    }
}
