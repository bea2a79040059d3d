use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub openweather_api_key: String,

    /// Connection string for the embedded history database.
    pub database_url: String,

    /// Options passed along with every weather lookup.
    pub weather: WeatherOptions,
}

/// Fixed locale/unit options for provider requests.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherOptions {
    /// Display language for condition descriptions (`lang` query param).
    pub lang: String,
    pub units: Units,
}

/// Measurement system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "imperial" => Self::Imperial,
            _ => Self::Metric,
        }
    }

    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn wind_speed_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            telegram_bot_token: std::env::var("TELEGRAM_BOT_TOKEN")?,
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY")?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://cities.db".to_string()),
            weather: WeatherOptions {
                lang: std::env::var("WEATHER_LANG").unwrap_or_else(|_| "en".to_string()),
                units: Units::from_str_loose(
                    &std::env::var("WEATHER_UNITS").unwrap_or_default(),
                ),
            },
        })
    }
}
