//! The comparison pipeline: place → location → four anchors → 28 daily
//! summaries → per-year series.
//!
//! Calls are issued one at a time, in anchor order and then date order.
//! A failed day never stops the batch; it is kept as an empty record.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    dates::{Anchor, WINDOW_DAYS, anchors},
    error::CompareError,
    extract::{ComparisonSeries, TemperatureUnit, extract_max_temperatures},
    model::{ComparisonRequest, DaySummary, Location, WeatherWindow},
    place::normalize_place,
    provider::WeatherProvider,
};

/// Geocode a free-text place. An empty candidate list is
/// [`CompareError::PlaceNotFound`]; transport or HTTP failures are passed on.
pub async fn resolve_place(
    provider: &dyn WeatherProvider,
    place: &str,
) -> anyhow::Result<Location> {
    let query = normalize_place(place);
    if query.is_empty() {
        return Err(CompareError::PlaceNotFound(place.trim().to_string()).into());
    }

    match provider.geocode(&query).await? {
        Some(location) => {
            info!(
                place = %location.display_name(),
                lat = location.latitude(),
                lon = location.longitude(),
                "Resolved place"
            );
            Ok(location)
        }
        None => Err(CompareError::PlaceNotFound(place.trim().to_string()).into()),
    }
}

/// Fetch every day of `anchor`'s window. Always returns [`WINDOW_DAYS`]
/// records; days the provider failed on have no summary.
pub async fn fetch_window(
    provider: &dyn WeatherProvider,
    location: &Location,
    anchor: Anchor,
) -> WeatherWindow {
    let mut summaries: [Option<DaySummary>; WINDOW_DAYS] = Default::default();

    for (slot, date) in summaries.iter_mut().zip(anchor.window.dates()) {
        *slot = match provider.day_summary(location, date).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!(%date, error = %format!("{err:#}"), "No weather data for day");
                None
            }
        };
    }

    WeatherWindow::new(anchor, summaries)
}

/// Fetched windows for one request, in anchor order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub request: ComparisonRequest,
    pub windows: Vec<WeatherWindow>,
}

impl Comparison {
    pub fn series(&self, unit: TemperatureUnit) -> Vec<ComparisonSeries> {
        self.windows
            .iter()
            .map(|w| extract_max_temperatures(w, unit))
            .collect()
    }

    pub fn report(&self, unit: TemperatureUnit) -> ComparisonReport {
        ComparisonReport {
            place: self.request.place.clone(),
            location: self.request.location.clone(),
            start: self.request.start,
            baseline_year: self.request.baseline_year,
            unit,
            series: self.series(unit),
        }
    }
}

/// What gets shown to the user, also the shape of `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub place: String,
    pub location: Location,
    pub start: NaiveDate,
    pub baseline_year: i32,
    pub unit: TemperatureUnit,
    pub series: Vec<ComparisonSeries>,
}

pub async fn fetch_comparison(
    provider: &dyn WeatherProvider,
    request: ComparisonRequest,
) -> Result<Comparison, CompareError> {
    let anchors = anchors(request.start, request.baseline_year)?;

    let mut windows = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        windows.push(fetch_window(provider, &request.location, anchor).await);
    }

    let missing: usize = windows.iter().map(WeatherWindow::missing_days).sum();
    info!(
        requested = windows.len() * WINDOW_DAYS,
        missing, "Fetched comparison windows"
    );

    Ok(Comparison { request, windows })
}

/// Full pipeline for a place name and an already-parsed start date.
pub async fn compare(
    provider: &dyn WeatherProvider,
    place: &str,
    start: NaiveDate,
    baseline_year: i32,
) -> anyhow::Result<Comparison> {
    // Validate the dates before spending a geocoding call.
    anchors(start, baseline_year)?;

    let location = resolve_place(provider, place).await?;
    let request = ComparisonRequest {
        place: place.trim().to_string(),
        location,
        start,
        baseline_year,
    };

    Ok(fetch_comparison(provider, request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemperatureSummary;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::Datelike;
    use std::sync::Mutex;

    /// Answers every day with `273.15 + day_of_month` K unless the date is
    /// listed in `failing`.
    #[derive(Debug, Default)]
    struct FakeProvider {
        location: Option<Location>,
        failing: Vec<NaiveDate>,
        geocode_queries: Mutex<Vec<String>>,
        day_calls: Mutex<Vec<NaiveDate>>,
    }

    impl FakeProvider {
        fn at_paris() -> Self {
            Self {
                location: Some(Location::new("Paris", 48.8566, 2.3522).unwrap()),
                ..Default::default()
            }
        }

        fn day_calls(&self) -> Vec<NaiveDate> {
            self.day_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn geocode(&self, place: &str) -> anyhow::Result<Option<Location>> {
            self.geocode_queries.lock().unwrap().push(place.to_string());
            Ok(self.location.clone())
        }

        async fn day_summary(
            &self,
            _location: &Location,
            date: NaiveDate,
        ) -> anyhow::Result<DaySummary> {
            self.day_calls.lock().unwrap().push(date);
            if self.failing.contains(&date) {
                return Err(anyhow!("OpenWeather day summary request failed with status 500"));
            }
            Ok(DaySummary {
                temperature: Some(TemperatureSummary {
                    max: Some(273.15 + f64::from(date.day())),
                    ..Default::default()
                }),
            })
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn fetch_window_requests_seven_consecutive_days() {
        let provider = FakeProvider::at_paris();
        let location = provider.location.clone().unwrap();
        let [anchor, ..] = anchors(ymd(2024, 12, 29), 1981).unwrap();

        let window = fetch_window(&provider, &location, anchor).await;

        let expected: Vec<NaiveDate> = anchor.window.dates().to_vec();
        assert_eq!(provider.day_calls(), expected);
        assert_eq!(window.records().len(), 7);
        assert_eq!(window.records()[6].date, ymd(2025, 1, 4));
        assert_eq!(window.missing_days(), 0);
    }

    #[tokio::test]
    async fn failed_day_leaves_a_gap_without_aborting() {
        let provider = FakeProvider {
            failing: vec![ymd(2024, 3, 3)],
            ..FakeProvider::at_paris()
        };
        let location = provider.location.clone().unwrap();
        let [anchor, ..] = anchors(ymd(2024, 3, 1), 1981).unwrap();

        let window = fetch_window(&provider, &location, anchor).await;

        assert_eq!(provider.day_calls().len(), 7);
        assert_eq!(window.records().len(), 7);
        assert_eq!(window.missing_days(), 1);
        assert!(window.records()[2].summary.is_none());

        let series = extract_max_temperatures(&window, TemperatureUnit::Celsius);
        assert_eq!(series.dates.len(), 6);
        assert!(!series.dates.contains(&ymd(2024, 3, 3)));
        assert_eq!(series.temperature_on(ymd(2024, 3, 4)), Some(4.0));
    }

    #[tokio::test]
    async fn every_day_failing_still_yields_full_windows() {
        let start = ymd(2024, 5, 1);
        let failing = anchors(start, 1979)
            .unwrap()
            .iter()
            .flat_map(|a| a.window.dates())
            .collect();
        let provider = FakeProvider {
            failing,
            ..FakeProvider::at_paris()
        };

        let comparison = compare(&provider, "Paris, France", start, 1979)
            .await
            .unwrap();

        assert_eq!(provider.day_calls().len(), 28);
        for window in &comparison.windows {
            assert_eq!(window.records().len(), 7);
            assert_eq!(window.missing_days(), 7);
        }
        assert!(
            comparison
                .series(TemperatureUnit::Fahrenheit)
                .iter()
                .all(|s| s.is_empty())
        );
    }

    #[tokio::test]
    async fn compare_fetches_four_windows_in_anchor_order() {
        let provider = FakeProvider::at_paris();

        let comparison = compare(&provider, " Paris, France ", ymd(2024, 2, 29), 1979)
            .await
            .unwrap();

        assert_eq!(
            *provider.geocode_queries.lock().unwrap(),
            vec!["Paris, FR".to_string()]
        );
        assert_eq!(provider.day_calls().len(), 28);
        assert_eq!(comparison.request.place, "Paris, France");

        let starts: Vec<NaiveDate> = comparison
            .windows
            .iter()
            .map(|w| w.anchor.date())
            .collect();
        assert_eq!(
            starts,
            [
                ymd(2024, 2, 29),
                ymd(2023, 2, 28),
                ymd(2014, 2, 28),
                ymd(1979, 2, 28)
            ]
        );

        let calls = provider.day_calls();
        assert_eq!(calls[0], ymd(2024, 2, 29));
        assert_eq!(calls[7], ymd(2023, 2, 28));
        assert_eq!(calls[27], ymd(1979, 3, 6));

        let report = comparison.report(TemperatureUnit::Celsius);
        assert_eq!(report.series.len(), 4);
        assert_eq!(report.series[3].temperatures[0], 28.0);
    }

    #[tokio::test]
    async fn unknown_place_fetches_no_weather() {
        let provider = FakeProvider::default();

        let err = compare(&provider, "Zzyzx, Nowhere", ymd(2024, 7, 1), 1981)
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<CompareError>(),
            Some(&CompareError::PlaceNotFound("Zzyzx, Nowhere".into()))
        );
        assert!(provider.day_calls().is_empty());
    }

    #[tokio::test]
    async fn blank_place_is_not_sent_to_geocoder() {
        let provider = FakeProvider::at_paris();

        let err = resolve_place(&provider, "  , ").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CompareError>(),
            Some(CompareError::PlaceNotFound(_))
        ));
        assert!(provider.geocode_queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_baseline_fails_before_geocoding() {
        let provider = FakeProvider::at_paris();

        let err = compare(&provider, "Paris", ymd(2024, 7, 1), 500_000)
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<CompareError>(),
            Some(&CompareError::YearOutOfRange(500_000))
        );
        assert!(provider.geocode_queries.lock().unwrap().is_empty());
    }
}
