use thiserror::Error;

/// Failure categories a weather lookup can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Auth,
    Http,
    Network,
    Api,
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Auth => "auth",
            ErrorKind::Http => "http",
            ErrorKind::Network => "network",
            ErrorKind::Api => "api",
            ErrorKind::Parse => "parse",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`crate::WeatherProvider::get_weather`].
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key is available; nothing was sent over the network.
    #[error("API key (WEATHERAPI_KEY) is not configured")]
    Configuration,

    /// The provider rejected the credential with HTTP 401.
    #[error("provider rejected the API key (401 Unauthorized)")]
    Auth,

    /// Any other non-success status, or an HTTP-layer failure without one.
    #[error("{}", http_display(.status, .message))]
    Http { status: Option<u16>, message: String },

    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(String),

    /// The provider answered but reported an error in the payload.
    #[error("{0}")]
    Api(String),

    /// The payload did not have the expected shape.
    #[error("unexpected response payload: {0}")]
    Parse(String),
}

fn http_display(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("status {code}: {message}"),
        None => message.to_string(),
    }
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Configuration => ErrorKind::Configuration,
            WeatherError::Auth => ErrorKind::Auth,
            WeatherError::Http { .. } => ErrorKind::Http,
            WeatherError::Network(_) => ErrorKind::Network,
            WeatherError::Api(_) => ErrorKind::Api,
            WeatherError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// Classify a non-success status. 401 is split out because it means the
    /// key is wrong, not that the request might work later.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        if status == 401 {
            WeatherError::Auth
        } else {
            WeatherError::Http { status: Some(status), message }
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
            return WeatherError::Network(err.to_string());
        }

        match err.status() {
            Some(status) => WeatherError::from_status(status.as_u16(), err.to_string()),
            None => WeatherError::Http { status: None, message: err.to_string() },
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}
