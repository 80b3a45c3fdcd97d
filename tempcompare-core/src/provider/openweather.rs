use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::{DaySummary, Location};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const DAY_SUMMARY_PATH: &str = "/data/3.0/onecall/day_summary";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_body(&self, path: &str, query: &[(&str, String)], what: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoCandidate {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
    state: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode(&self, place: &str) -> Result<Option<Location>> {
        debug!(place, "Geocoding place");

        let body = self
            .get_body(
                GEOCODING_PATH,
                &[("q", place.to_string()), ("limit", "1".to_string())],
                "geocoding",
            )
            .await?;

        let candidates: Vec<OwGeoCandidate> =
            serde_json::from_str(&body).context("Failed to parse OpenWeather geocoding JSON")?;

        let Some(first) = candidates.into_iter().next() else {
            return Ok(None);
        };

        let location = Location::new(first.name, first.lat, first.lon)?
            .with_region(first.state, first.country);

        Ok(Some(location))
    }

    async fn day_summary(&self, location: &Location, date: NaiveDate) -> Result<DaySummary> {
        let date = date.format("%Y-%m-%d").to_string();
        debug!(
            lat = location.latitude(),
            lon = location.longitude(),
            %date,
            "Fetching day summary"
        );

        let body = self
            .get_body(
                DAY_SUMMARY_PATH,
                &[
                    ("lat", location.latitude().to_string()),
                    ("lon", location.longitude().to_string()),
                    ("date", date),
                ],
                "day summary",
            )
            .await?;

        serde_json::from_str(&body).context("Failed to parse OpenWeather day summary JSON")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
