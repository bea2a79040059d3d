use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::{replies, AppState};
use crate::db;

/// Callback actions. City-parameterized actions encode their payload as
/// `<action>|<cityName>`, split on the first `|`.
pub const SHOW_LAST_CITIES: &str = "show_last_cities";
pub const CITY_WEATHER: &str = "weather";
pub const DETAILED_FORECAST: &str = "detailed_forecast";

const HISTORY_LIMIT: i64 = 5;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let data = match q.data.as_deref() {
        Some(d) => d,
        None => return Ok(()),
    };

    let chat_id = match q.message.as_ref() {
        Some(m) => m.chat().id,
        None => return Ok(()),
    };

    let user_id = q.from.id.0 as i64;

    // Clear the button spinner before doing any work.
    bot.answer_callback_query(&q.id).await?;

    let units = state.config.weather.units;

    match split_action(data) {
        // ── Recent Cities Menu ─────────────────────────────────────
        (SHOW_LAST_CITIES, _) => {
            let cities = match state.db.recent_cities(user_id, HISTORY_LIMIT).await {
                Ok(cities) => cities,
                Err(e) => {
                    tracing::error!("Failed to load history for user {}: {}", user_id, e);
                    bot.send_message(chat_id, replies::HISTORY_FAILED).await?;
                    return Ok(());
                }
            };

            if cities.is_empty() {
                bot.send_message(chat_id, replies::NO_CITIES_YET).await?;
                return Ok(());
            }

            let rows: Vec<Vec<InlineKeyboardButton>> = db::dedupe_cities(&cities)
                .into_iter()
                .map(|city| {
                    let data = format!("{CITY_WEATHER}|{city}");
                    vec![InlineKeyboardButton::callback(city, data)]
                })
                .collect();

            bot.send_message(chat_id, replies::PICK_CITY)
                .reply_markup(InlineKeyboardMarkup::new(rows))
                .await?;
        }

        // ── Short Forecast for a Picked City ───────────────────────
        (CITY_WEATHER, Some(city)) => {
            match state.weather.fetch(city).await {
                Ok(report) => {
                    bot.send_message(chat_id, replies::short_report(city, &report, units))
                        .await?;
                }
                Err(e) => {
                    tracing::warn!("Weather lookup for {:?} failed: {}", city, e);
                    bot.send_message(chat_id, replies::CITY_LOOKUP_FAILED).await?;
                }
            }
        }

        // ── Detailed Forecast ──────────────────────────────────────
        (DETAILED_FORECAST, Some(city)) => {
            match state.weather.fetch(city).await {
                Ok(report) => {
                    bot.send_message(chat_id, replies::detailed_report(city, &report, units))
                        .await?;
                }
                Err(e) => {
                    tracing::warn!("Weather lookup for {:?} failed: {}", city, e);
                    bot.send_message(chat_id, replies::CITY_LOOKUP_FAILED).await?;
                }
            }
        }

        _ => {}
    }

    Ok(())
}

/// Split callback data into an action and an optional payload around the
/// first `|`. Everything after the first `|` belongs to the payload.
fn split_action(data: &str) -> (&str, Option<&str>) {
    match data.split_once('|') {
        Some((action, payload)) => (action, Some(payload)),
        None => (data, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_action_has_no_payload() {
        assert_eq!(split_action("show_last_cities"), ("show_last_cities", None));
    }

    #[test]
    fn payload_splits_on_first_separator_only() {
        assert_eq!(
            split_action("weather|Sankt Peterburg"),
            ("weather", Some("Sankt Peterburg"))
        );
        assert_eq!(
            split_action("detailed_forecast|a|b"),
            ("detailed_forecast", Some("a|b"))
        );
    }

    #[test]
    fn empty_payload_is_preserved() {
        assert_eq!(split_action("weather|"), ("weather", Some("")));
    }
}
