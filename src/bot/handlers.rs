use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatAction, InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::{callbacks, replies, AppState};

/// Handler for free-text messages: the text is treated verbatim as a city
/// name, no trimming or case folding.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Stickers, photos etc. carry no text and are ignored.
    let city = match msg.text() {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(()),
    };

    let user_id = msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(0);

    bot.send_chat_action(msg.chat.id, ChatAction::Typing).await?;

    // ── 1. Look up the weather ─────────────────────────────────────

    let report = match state.weather.fetch(city).await {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!("Weather lookup for {:?} failed: {}", city, e);
            bot.send_message(msg.chat.id, replies::LOOKUP_FAILED).await?;
            return Ok(());
        }
    };

    // ── 2. Record the query ────────────────────────────────────────

    // The answer is already computed; a failed write must not block it.
    if let Err(e) = state.db.record(user_id, city).await {
        tracing::error!("Failed to record city {:?} for user {}: {}", city, user_id, e);
    }

    // ── 3. Reply with the report and the follow-up menu ────────────

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            replies::SHOW_LAST_CITIES_LABEL,
            callbacks::SHOW_LAST_CITIES,
        )],
        vec![InlineKeyboardButton::callback(
            replies::DETAILED_FORECAST_LABEL,
            format!("{}|{city}", callbacks::DETAILED_FORECAST),
        )],
    ]);

    bot.send_message(
        msg.chat.id,
        replies::brief_report(city, &report, state.config.weather.units),
    )
    .reply_markup(keyboard)
    .await?;

    Ok(())
}
