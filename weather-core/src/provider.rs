use crate::{WeatherError, WeatherQuery, WeatherResult};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherClient;

/// Anything that can answer a single current-conditions lookup.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError>;
}
