use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::WeatherError,
    format::capitalize,
    model::{ApiCredential, WeatherQuery, WeatherResult},
};

use super::WeatherProvider;

/// Language the provider should use for condition descriptions.
pub const RESPONSE_LANG: &str = "ru";

/// Client for the WeatherAPI.com `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: Option<ApiCredential>,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: Option<ApiCredential>, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.base_url.clone())
    }

    /// Look up current conditions for `query`.
    ///
    /// Fails with [`WeatherError::Configuration`] before touching the network
    /// when no API key is set.
    pub async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError> {
        let result = match &self.api_key {
            Some(api_key) => self.fetch_current(api_key, query).await,
            None => Err(WeatherError::Configuration),
        };

        match &result {
            Ok(weather) => info!(
                city = query.city(),
                location = %weather.location_name,
                "weather lookup succeeded"
            ),
            Err(err) => warn!(city = query.city(), kind = %err.kind(), error = %err, "weather lookup failed"),
        }

        result
    }

    async fn fetch_current(
        &self,
        api_key: &ApiCredential,
        query: &WeatherQuery,
    ) -> Result<WeatherResult, WeatherError> {
        let url = format!("{}/current.json", self.base_url);
        debug!(%url, city = query.city(), lang = RESPONSE_LANG, "sending WeatherAPI request");

        let res = self
            .http
            .get(&url)
            .query(&[("key", api_key.expose()), ("q", query.city()), ("lang", RESPONSE_LANG)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received WeatherAPI response");

        if !status.is_success() {
            let message = provider_error_message(&body).unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    truncate_body(&body)
                }
            });
            return Err(WeatherError::from_status(status.as_u16(), message));
        }

        parse_current(&body)
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError> {
        self.fetch_weather(query).await
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

/// Decode a 2xx body: either a provider-reported error or current conditions.
fn parse_current(body: &str) -> Result<WeatherResult, WeatherError> {
    let value: Value = serde_json::from_str(body)?;

    if let Some(err) = value.get("error").filter(|e| e.is_object()) {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(WeatherError::Api(message));
    }

    let parsed: WaResponse = serde_json::from_value(value)?;

    Ok(WeatherResult {
        location_name: parsed.location.name,
        temperature_c: parsed.current.temp_c,
        condition: capitalize(&parsed.current.condition.text),
        humidity_pct: parsed.current.humidity,
        wind_kph: parsed.current.wind_kph,
    })
}

/// WeatherAPI also puts `{"error": {"message": ...}}` in 4xx bodies.
fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("error")?.get("message")?.as_str().map(str::to_string)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
