use crate::model::ApiCredential;

/// Environment variable holding the WeatherAPI.com key.
pub const API_KEY_VAR: &str = "WEATHERAPI_KEY";

/// Optional override of the provider base URL, e.g. for a proxy.
pub const BASE_URL_VAR: &str = "WEATHERAPI_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<ApiCredential>,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).and_then(ApiCredential::new);

        let base_url = lookup(BASE_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self { api_key, base_url }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
