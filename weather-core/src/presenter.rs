//! UI-independent state behind the weather window.
//!
//! The window only forwards the input text to [`Presenter::search`] and then
//! renders [`Presenter::output`] and [`Presenter::notice`].

use tracing::debug;

use crate::{
    config::API_KEY_VAR,
    error::WeatherError,
    format::format_report,
    model::WeatherQuery,
    provider::WeatherProvider,
};

/// Output text before the first search.
pub const INITIAL_PROMPT: &str = "Введите город и нажмите 'Узнать Погоду'";

/// Output text after an empty search.
pub const WAITING_PROMPT: &str = "Ожидание ввода города...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A message the window should pop up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn warning(title: &str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, title: title.to_string(), message: message.into() }
    }

    fn error(title: &str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, title: title.to_string(), message: message.into() }
    }

    /// Errors block the rest of the window until dismissed; warnings do not.
    pub fn is_modal(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Pick the dialog text for a failed lookup.
    pub fn for_error(err: &WeatherError) -> Self {
        match err {
            WeatherError::Configuration => Notice::error(
                "Ошибка",
                format!("Ключ API ({API_KEY_VAR}) не найден. Проверьте ваш файл .env."),
            ),
            WeatherError::Auth => {
                Notice::error("Ошибка 401", "Неверный API-ключ. Проверьте ключ в .env.")
            }
            WeatherError::Http { .. } => Notice::error("Ошибка HTTP", format!("Ошибка HTTP: {err}")),
            WeatherError::Network(details) => {
                Notice::error("Ошибка сети", format!("Ошибка при подключении: {details}"))
            }
            WeatherError::Api(message) => Notice::error("Ошибка API", message.clone()),
            WeatherError::Parse(_) => {
                Notice::error("Непредвиденная ошибка", format!("Произошла ошибка: {err}"))
            }
        }
    }
}

/// What a call to [`Presenter::search`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Input was blank; the provider was not called.
    Rejected,
    Shown,
    Failed,
}

#[derive(Debug)]
pub struct Presenter<P> {
    provider: P,
    output: String,
    notice: Option<Notice>,
}

impl<P: WeatherProvider> Presenter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, output: INITIAL_PROMPT.to_string(), notice: None }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one lookup for the raw text from the input field.
    ///
    /// On failure the output text is left as it was.
    pub async fn search(&mut self, raw_input: &str) -> SearchOutcome {
        let Some(query) = WeatherQuery::parse(raw_input) else {
            debug!("empty city input, skipping lookup");
            self.notice =
                Some(Notice::warning("Предупреждение", "Пожалуйста, введите название города."));
            self.output = WAITING_PROMPT.to_string();
            return SearchOutcome::Rejected;
        };

        match self.provider.get_weather(&query).await {
            Ok(result) => {
                self.output = format_report(&result);
                self.notice = None;
                SearchOutcome::Shown
            }
            Err(err) => {
                self.notice = Some(Notice::for_error(&err));
                SearchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherResult;
    use async_trait::async_trait;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct FakeProvider {
        calls: AtomicUsize,
        last_city: Mutex<Option<String>>,
        fail_with: Option<fn() -> WeatherError>,
    }

    impl FakeProvider {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), last_city: Mutex::new(None), fail_with: None }
        }

        fn failing(make: fn() -> WeatherError) -> Self {
            Self { fail_with: Some(make), ..Self::ok() }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_city.lock().unwrap() = Some(query.city().to_string());

            if let Some(make) = self.fail_with {
                return Err(make());
            }

            Ok(WeatherResult {
                location_name: "Paris".into(),
                temperature_c: 18.5,
                condition: "Partly cloudy".into(),
                humidity_pct: 60,
                wind_kph: 12.3,
            })
        }
    }

    #[tokio::test]
    async fn starts_with_initial_prompt() {
        let presenter = Presenter::new(FakeProvider::ok());
        assert_eq!(presenter.output(), INITIAL_PROMPT);
        assert!(presenter.notice().is_none());
    }

    #[tokio::test]
    async fn blank_input_never_calls_provider() {
        let mut presenter = Presenter::new(FakeProvider::ok());

        for input in ["", "   ", "\t\n"] {
            assert_eq!(presenter.search(input).await, SearchOutcome::Rejected);
            assert_eq!(presenter.output(), WAITING_PROMPT);

            let notice = presenter.notice().expect("warning expected");
            assert_eq!(notice.severity, Severity::Warning);
            assert!(!notice.is_modal());
        }

        assert_eq!(presenter.provider().calls(), 0);
    }

    #[tokio::test]
    async fn success_replaces_output_with_report() {
        let mut presenter = Presenter::new(FakeProvider::ok());

        assert_eq!(presenter.search("  Paris ").await, SearchOutcome::Shown);
        assert_eq!(presenter.provider().calls(), 1);
        assert_eq!(presenter.provider().last_city.lock().unwrap().as_deref(), Some("Paris"));

        let lines: Vec<&str> = presenter.output().lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Paris"));
        assert!(lines[1].contains("18.5"));
        assert!(lines[2].contains("Partly cloudy"));
        assert!(lines[3].contains("60"));
        assert!(lines[4].contains("12.3"));
        assert!(presenter.notice().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_previous_output() {
        let mut presenter = Presenter::new(FakeProvider::failing(|| WeatherError::Auth));

        assert_eq!(presenter.search("Paris").await, SearchOutcome::Failed);
        assert_eq!(presenter.output(), INITIAL_PROMPT);

        let notice = presenter.notice().expect("error expected");
        assert!(notice.is_modal());
        assert_eq!(notice.title, "Ошибка 401");

        presenter.dismiss_notice();
        assert!(presenter.notice().is_none());
    }

    #[test]
    fn each_error_kind_gets_its_own_title() {
        let cases = [
            (WeatherError::Configuration, "Ошибка"),
            (WeatherError::Auth, "Ошибка 401"),
            (WeatherError::Http { status: Some(500), message: "boom".into() }, "Ошибка HTTP"),
            (WeatherError::Network("refused".into()), "Ошибка сети"),
            (WeatherError::Api("No matching location found.".into()), "Ошибка API"),
            (WeatherError::Parse("missing field".into()), "Непредвиденная ошибка"),
        ];

        for (err, title) in cases {
            let notice = Notice::for_error(&err);
            assert_eq!(notice.title, title, "{err:?}");
            assert_eq!(notice.severity, Severity::Error);
        }
    }

    #[test]
    fn api_notice_carries_provider_text_verbatim() {
        let notice = Notice::for_error(&WeatherError::Api("No matching location found.".into()));
        assert_eq!(notice.message, "No matching location found.");
    }

    #[test]
    fn configuration_notice_names_the_variable() {
        let notice = Notice::for_error(&WeatherError::Configuration);
        assert!(notice.message.contains("WEATHERAPI_KEY"));
    }
}
