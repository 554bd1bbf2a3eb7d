//! Binary crate for the weather desktop window.
//!
//! This crate focuses on:
//! - Loading `.env` and the process environment
//! - Logging setup
//! - Drawing the window and forwarding user actions to the core presenter

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::Config;

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,weather_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "failed to load .env file"),
    }

    let config = Config::from_env();
    if !config.has_api_key() {
        warn!("WEATHERAPI_KEY is not set; lookups will report a configuration error");
    }

    let window = app::WeatherWindow::new(&config)?;
    app::run(window)
}
