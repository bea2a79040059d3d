use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::{AppConfig, WeatherOptions};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Provider(StatusCode),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider response contained no weather conditions")]
    EmptyConditions,
}

/// Current conditions for one place, decoded from a single provider response.
/// Produced fresh per lookup, never cached.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Atmospheric pressure, hPa.
    pub pressure: u32,
    pub description: String,
    pub wind_speed: f64,
    /// Cloud cover, percent.
    pub cloud_cover: u8,
}

// ── Provider wire format ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OwResponse {
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
    clouds: OwClouds,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

impl TryFrom<OwResponse> for WeatherReport {
    type Error = WeatherError;

    // The provider may return several condition entries; only the first is
    // used. An empty list counts as a decode failure.
    fn try_from(raw: OwResponse) -> Result<Self, WeatherError> {
        let condition = raw
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::EmptyConditions)?;

        Ok(Self {
            temperature: raw.main.temp,
            feels_like: raw.main.feels_like,
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            description: condition.description,
            wind_speed: raw.wind.speed,
            cloud_cover: raw.clouds.all,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    options: WeatherOptions,
}

impl WeatherClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openweather_api_key.clone(),
            options: config.weather.clone(),
        }
    }

    /// Fetch current weather for a place name. The name is passed verbatim
    /// as the `q` query parameter.
    pub async fn fetch(&self, place: &str) -> Result<WeatherReport, WeatherError> {
        let resp = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[
                ("q", place),
                ("appid", self.api_key.as_str()),
                ("lang", self.options.lang.as_str()),
                ("units", self.options.units.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::Provider(status));
        }

        let body = resp.text().await?;
        let raw: OwResponse = serde_json::from_str(&body)?;
        WeatherReport::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Result<WeatherReport, WeatherError> {
        let raw: OwResponse = serde_json::from_str(body)?;
        WeatherReport::try_from(raw)
    }

    #[test]
    fn decodes_full_payload() {
        let body = r#"{
            "main": {"temp": 21.5, "feels_like": 20.0, "humidity": 60, "pressure": 1012},
            "weather": [{"description": "clear sky"}],
            "wind": {"speed": 3.2},
            "clouds": {"all": 10}
        }"#;

        let report = decode(body).expect("payload should decode");
        assert_eq!(report.temperature, 21.5);
        assert_eq!(report.feels_like, 20.0);
        assert_eq!(report.humidity, 60);
        assert_eq!(report.pressure, 1012);
        assert_eq!(report.description, "clear sky");
        assert_eq!(report.wind_speed, 3.2);
        assert_eq!(report.cloud_cover, 10);
    }

    #[test]
    fn uses_first_of_several_conditions() {
        let body = r#"{
            "main": {"temp": 4.0, "feels_like": 1.2, "humidity": 90, "pressure": 998},
            "weather": [{"description": "light rain"}, {"description": "mist"}],
            "wind": {"speed": 7.5},
            "clouds": {"all": 100}
        }"#;

        let report = decode(body).expect("payload should decode");
        assert_eq!(report.description, "light rain");
    }

    #[test]
    fn empty_condition_list_is_an_error() {
        let body = r#"{
            "main": {"temp": 21.5, "feels_like": 20.0, "humidity": 60, "pressure": 1012},
            "weather": [],
            "wind": {"speed": 3.2},
            "clouds": {"all": 10}
        }"#;

        let err = decode(body).expect_err("empty conditions must fail");
        assert!(matches!(err, WeatherError::EmptyConditions));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode(r#"{"cod": "404", "message": "city not found"}"#)
            .expect_err("wrong shape must fail");
        assert!(matches!(err, WeatherError::Decode(_)));
    }
}
