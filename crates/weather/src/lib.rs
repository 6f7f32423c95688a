//! Current-conditions weather client.
//!
//! Wraps the OpenWeatherMap `/weather` endpoint. Unit contract: the provider
//! is called without a units parameter and therefore returns Kelvin;
//! temperature fields are converted to Celsius here, rounded to 2 decimals.
//! Failures (non-success status, payload missing the `main` block) surface
//! immediately as [`WeatherError`] — no retry, no partial result.

use serde::{Deserialize, Serialize};
use studyhall_core::error::WeatherError;
use tracing::debug;

/// Current conditions for a location, temperatures in Celsius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    /// The normalized location the report is for
    pub location: String,

    /// Current temperature (°C, 2 decimals)
    pub temperature: f64,

    /// Perceived temperature (°C, 2 decimals)
    pub feels_like: f64,

    /// Daily minimum (°C, 2 decimals)
    pub temp_min: f64,

    /// Daily maximum (°C, 2 decimals)
    pub temp_max: f64,

    /// Relative humidity (%)
    pub humidity: f64,

    /// Condition description, capitalized (e.g. "Light rain")
    pub description: String,
}

/// Client for the OpenWeatherMap current-weather endpoint.
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Fetch current conditions for a location.
    ///
    /// Comma-separated "city, region" inputs are normalized to the city
    /// segment before querying.
    pub async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let city = normalize_location(location);
        let url = format!("{}/weather", self.base_url);

        debug!(city = %city, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[("q", city.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 404 {
            return Err(WeatherError::LocationNotFound(city));
        }

        if status == 401 || status == 403 {
            return Err(WeatherError::NotConfigured(
                "Invalid or missing weather API key".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            return Err(WeatherError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let payload: ApiPayload = response.json().await.map_err(|e| WeatherError::ApiError {
            status_code: 200,
            message: format!("Failed to parse weather payload: {e}"),
        })?;

        report_from_payload(city, payload)
    }
}

/// Normalize "city, region" inputs by taking the city segment.
///
/// `"Paris, FR"` → `"Paris"`; inputs without a comma pass through trimmed.
pub fn normalize_location(location: &str) -> String {
    match location.split_once(',') {
        Some((city, _)) => city.trim().to_string(),
        None => location.trim().to_string(),
    }
}

/// Convert Kelvin to Celsius, rounded to 2 decimals.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    round2(kelvin - 273.15)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Build a report from the provider payload, converting Kelvin to Celsius.
fn report_from_payload(city: String, payload: ApiPayload) -> Result<WeatherReport, WeatherError> {
    let main = payload
        .main
        .ok_or_else(|| WeatherError::MissingField("main".into()))?;

    let description = payload
        .weather
        .first()
        .map(|c| capitalize(&c.description))
        .unwrap_or_default();

    Ok(WeatherReport {
        location: city,
        temperature: kelvin_to_celsius(main.temp),
        feels_like: kelvin_to_celsius(main.feels_like),
        temp_min: kelvin_to_celsius(main.temp_min),
        temp_max: kelvin_to_celsius(main.temp_max),
        humidity: main.humidity,
        description,
    })
}

// --- OpenWeatherMap API types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiPayload {
    #[serde(default)]
    main: Option<MainFields>,
    #[serde(default)]
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct MainFields {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point_converts_exactly() {
        assert_eq!(kelvin_to_celsius(273.15), 0.00);
    }

    #[test]
    fn conversion_rounds_to_two_decimals() {
        assert_eq!(kelvin_to_celsius(293.708), 20.56);
        assert_eq!(kelvin_to_celsius(300.15), 27.0);
    }

    #[test]
    fn normalize_strips_region_segment() {
        assert_eq!(normalize_location("Paris, FR"), "Paris");
        assert_eq!(normalize_location("Syracuse, NY"), "Syracuse");
    }

    #[test]
    fn normalize_keeps_plain_city() {
        assert_eq!(normalize_location("Tokyo"), "Tokyo");
        assert_eq!(normalize_location("  London  "), "London");
    }

    #[test]
    fn normalize_takes_first_segment_of_many() {
        assert_eq!(normalize_location("Springfield, IL, US"), "Springfield");
    }

    #[test]
    fn payload_missing_main_is_an_error() {
        let payload: ApiPayload = serde_json::from_str(r#"{"weather":[]}"#).unwrap();
        let result = report_from_payload("Nowhere".into(), payload);
        assert!(matches!(result, Err(WeatherError::MissingField(f)) if f == "main"));
    }

    #[test]
    fn payload_converts_all_temperature_fields() {
        let payload: ApiPayload = serde_json::from_str(
            r#"{
                "main": {
                    "temp": 273.15,
                    "feels_like": 283.15,
                    "temp_min": 272.15,
                    "temp_max": 274.15,
                    "humidity": 81
                },
                "weather": [{"description": "light rain"}]
            }"#,
        )
        .unwrap();

        let report = report_from_payload("Paris".into(), payload).unwrap();
        assert_eq!(report.temperature, 0.00);
        assert_eq!(report.feels_like, 10.00);
        assert_eq!(report.temp_min, -1.00);
        assert_eq!(report.temp_max, 1.00);
        assert_eq!(report.humidity, 81.0);
        assert_eq!(report.description, "Light rain");
    }

    #[test]
    fn missing_conditions_leaves_description_empty() {
        let payload: ApiPayload = serde_json::from_str(
            r#"{"main": {"temp": 280.0, "feels_like": 280.0, "temp_min": 280.0, "temp_max": 280.0, "humidity": 50}}"#,
        )
        .unwrap();
        let report = report_from_payload("Oslo".into(), payload).unwrap();
        assert!(report.description.is_empty());
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = OpenWeatherClient::new("https://api.openweathermap.org/data/2.5/", "key");
        assert_eq!(client.base_url, "https://api.openweathermap.org/data/2.5");
    }

    #[test]
    fn report_serialization_roundtrip() {
        let report = WeatherReport {
            location: "Paris".into(),
            temperature: 18.5,
            feels_like: 17.9,
            temp_min: 15.0,
            temp_max: 21.3,
            humidity: 60.0,
            description: "Clear sky".into(),
        };
        let json = serde_json::to_string(&report).unwrap();
        let parsed: WeatherReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.location, "Paris");
        assert_eq!(parsed.temp_max, 21.3);
    }
}
