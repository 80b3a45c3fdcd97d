use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    Config,
    model::{DaySummary, Location},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of geocoding and per-day weather aggregates.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// First candidate for a free-text place, or `None` when nothing matched.
    async fn geocode(&self, place: &str) -> anyhow::Result<Option<Location>>;

    /// Daily aggregate for one date at one location. Any failure, including a
    /// non-success HTTP status, is an error.
    async fn day_summary(&self, location: &Location, date: NaiveDate) -> anyhow::Result<DaySummary>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `tempcompare configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::new(
        api_key,
        config.base_url(),
        Duration::from_secs(config.timeout_secs()),
    )?;

    Ok(Box::new(provider))
}
