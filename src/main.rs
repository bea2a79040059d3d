use std::sync::Arc;

use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

mod bot;
mod config;
mod db;
mod weather;

use config::AppConfig;
use db::Database;
use weather::WeatherClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🌦 Starting City Weather Bot...");

    // Load config
    let config = AppConfig::from_env()?;
    tracing::info!(
        "Config loaded. Units: {}, language: {}",
        config.weather.units.as_str(),
        config.weather.lang
    );

    // Initialize database
    let db = Database::connect(&config.database_url).await?;
    db.run_migrations().await?;
    tracing::info!("Database connected and migrations applied.");

    // Weather provider client
    let weather = WeatherClient::new(&config);

    // Build shared application state
    let state = Arc::new(bot::AppState {
        config: config.clone(),
        db,
        weather,
    });

    // Create the Telegram bot
    let bot = Bot::new(&config.telegram_bot_token);

    // Build the dispatcher
    let handler = bot::build_handler();

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
