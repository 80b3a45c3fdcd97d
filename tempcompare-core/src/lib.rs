//! Core library for the `tempcompare` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Calendar arithmetic for the per-year comparison windows
//! - Abstraction over the weather provider (OpenWeather)
//! - The fetch pipeline and max-temperature extraction
//!
//! It is used by `tempcompare-cli`, but can also be reused by other binaries or services.

pub mod compare;
pub mod config;
pub mod dates;
pub mod error;
pub mod extract;
pub mod model;
pub mod place;
pub mod provider;

pub use compare::{
    Comparison, ComparisonReport, compare, fetch_comparison, fetch_window, resolve_place,
};
pub use config::Config;
pub use dates::{
    Anchor, AnchorKind, DEFAULT_BASELINE_YEAR, DateWindow, WINDOW_DAYS, anchors, parse_date,
    shift_to_year,
};
pub use error::CompareError;
pub use extract::{
    ComparisonSeries, TemperatureUnit, extract_max_temperatures, kelvin_to_celsius,
    kelvin_to_fahrenheit,
};
pub use model::{
    ComparisonRequest, DailyWeatherRecord, DaySummary, Location, TemperatureSummary, WeatherWindow,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
