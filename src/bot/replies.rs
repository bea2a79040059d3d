//! Fixed reply texts and report formatting. Every failure path in the bot
//! resolves to one of these single-sentence strings; raw errors never reach
//! the chat.

use crate::config::Units;
use crate::weather::WeatherReport;

pub const GREETING: &str =
    "👋 Hi! Send me a city name and I'll reply with the current weather.";

pub const LOOKUP_FAILED: &str =
    "Couldn't fetch the weather. Check the city name and try again.";

pub const CITY_LOOKUP_FAILED: &str = "Couldn't fetch the weather for that city.";

pub const NO_CITIES_YET: &str = "You haven't asked about any cities yet.";

pub const HISTORY_FAILED: &str = "Couldn't load your recent cities.";

pub const PICK_CITY: &str = "Pick a city to see its forecast:";

pub const SHOW_LAST_CITIES_LABEL: &str = "Show my recent cities";

pub const DETAILED_FORECAST_LABEL: &str = "Detailed forecast for this city";

/// Reply to a fresh free-text lookup: city, temperature, condition.
pub fn brief_report(city: &str, report: &WeatherReport, units: Units) -> String {
    format!(
        "Weather in {city}:\n\
         Temperature: {:.1}{}\n\
         Condition: {}",
        report.temperature,
        units.temperature_suffix(),
        report.description,
    )
}

/// Reply to a city picked from the history menu: adds humidity.
pub fn short_report(city: &str, report: &WeatherReport, units: Units) -> String {
    format!(
        "Weather in {city}:\n\
         Temperature: {:.1}{}\n\
         Condition: {}\n\
         Humidity: {}%",
        report.temperature,
        units.temperature_suffix(),
        report.description,
        report.humidity,
    )
}

/// Extended reply for the detailed-forecast button: all report fields.
pub fn detailed_report(city: &str, report: &WeatherReport, units: Units) -> String {
    format!(
        "Detailed forecast for {city}:\n\
         Temperature: {:.1}{temp}\n\
         Feels like: {:.1}{temp}\n\
         Condition: {}\n\
         Humidity: {}%\n\
         Pressure: {} hPa\n\
         Wind speed: {:.1} {}\n\
         Cloud cover: {}%",
        report.temperature,
        report.feels_like,
        report.description,
        report.humidity,
        report.pressure,
        report.wind_speed,
        units.wind_speed_suffix(),
        report.cloud_cover,
        temp = units.temperature_suffix(),
    )
}
