//! Core library for the weather desktop app.
//!
//! This crate defines:
//! - Configuration & credential loading from the environment
//! - The WeatherAPI.com client and its error taxonomy
//! - Shared domain models (query, result) and report formatting
//! - A toolkit-independent presenter driving the window
//!
//! It is used by `weather-desktop`, but has no UI dependency of its own.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod presenter;
pub mod provider;

pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use format::format_report;
pub use model::{ApiCredential, WeatherQuery, WeatherResult};
pub use presenter::{Notice, Presenter, SearchOutcome, Severity};
pub use provider::{WeatherClient, WeatherProvider};
