use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    dates::{Anchor, WINDOW_DAYS},
    error::CompareError,
};

/// A geocoded point on the globe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub state: Option<String>,
    pub country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, CompareError> {
        let in_range =
            (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(CompareError::InvalidCoordinates {
                lat: latitude,
                lon: longitude,
            });
        }

        Ok(Self {
            name: name.into(),
            state: None,
            country: None,
            latitude,
            longitude,
        })
    }

    pub fn with_region(mut self, state: Option<String>, country: Option<String>) -> Self {
        self.state = state;
        self.country = country;
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// "Peoria, Illinois, US" style label built from whatever parts are known.
    pub fn display_name(&self) -> String {
        [
            Some(self.name.as_str()),
            self.state.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Per-day aggregate returned by the provider. Temperatures are Kelvin.
///
/// Every field is optional: the provider omits parts it has no data for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(default)]
    pub temperature: Option<TemperatureSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub morning: Option<f64>,
    #[serde(default)]
    pub afternoon: Option<f64>,
    #[serde(default)]
    pub evening: Option<f64>,
    #[serde(default)]
    pub night: Option<f64>,
}

impl DaySummary {
    pub fn max_kelvin(&self) -> Option<f64> {
        self.temperature.as_ref().and_then(|t| t.max)
    }
}

/// One day of a window; `summary` is `None` when the provider had nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyWeatherRecord {
    pub date: NaiveDate,
    pub summary: Option<DaySummary>,
}

/// The fetched days for one anchor. Always holds exactly [`WINDOW_DAYS`]
/// records in date order, whatever the provider returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherWindow {
    pub anchor: Anchor,
    records: Vec<DailyWeatherRecord>,
}

impl WeatherWindow {
    /// Pairs each day of the anchor's window with the matching summary.
    pub fn new(anchor: Anchor, summaries: [Option<DaySummary>; WINDOW_DAYS]) -> Self {
        let records = anchor
            .window
            .dates()
            .into_iter()
            .zip(summaries)
            .map(|(date, summary)| DailyWeatherRecord { date, summary })
            .collect();

        Self { anchor, records }
    }

    pub fn records(&self) -> &[DailyWeatherRecord] {
        &self.records
    }

    pub fn missing_days(&self) -> usize {
        self.records.iter().filter(|r| r.summary.is_none()).count()
    }
}

/// Everything the pipeline needs for one comparison, passed by value
/// instead of living in shared state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRequest {
    pub place: String,
    pub location: Location,
    pub start: NaiveDate,
    pub baseline_year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::anchors;

    #[test]
    fn location_rejects_out_of_range_coordinates() {
        assert!(Location::new("ok", 90.0, -180.0).is_ok());
        assert!(Location::new("ok", -90.0, 180.0).is_ok());

        let err = Location::new("north of north", 90.5, 0.0).unwrap_err();
        assert!(matches!(err, CompareError::InvalidCoordinates { .. }));
        assert!(Location::new("nan", f64::NAN, 0.0).is_err());
        assert!(Location::new("east", 0.0, 180.01).is_err());
    }

    #[test]
    fn display_name_skips_missing_parts() {
        let loc = Location::new("Peoria", 40.69, -89.59)
            .unwrap()
            .with_region(Some("Illinois".into()), Some("US".into()));
        assert_eq!(loc.display_name(), "Peoria, Illinois, US");

        let loc = Location::new("Paris", 48.85, 2.35)
            .unwrap()
            .with_region(None, Some("FR".into()));
        assert_eq!(loc.display_name(), "Paris, FR");
    }

    #[test]
    fn day_summary_tolerates_missing_fields() {
        let full: DaySummary = serde_json::from_str(
            r#"{"date":"2024-07-04","units":"standard","temperature":{"min":290.1,"max":301.5,"afternoon":300.0},"humidity":{"afternoon":40}}"#,
        )
        .unwrap();
        assert_eq!(full.max_kelvin(), Some(301.5));

        let no_temp: DaySummary = serde_json::from_str(r#"{"date":"2024-07-04"}"#).unwrap();
        assert_eq!(no_temp.max_kelvin(), None);

        let null_max: DaySummary =
            serde_json::from_str(r#"{"temperature":{"max":null}}"#).unwrap();
        assert_eq!(null_max.max_kelvin(), None);
    }

    #[test]
    fn weather_window_keeps_seven_records_with_gaps() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let [anchor, ..] = anchors(start, 1981).unwrap();
        let mut summaries: [Option<DaySummary>; WINDOW_DAYS] = Default::default();
        summaries[2] = Some(DaySummary::default());

        let window = WeatherWindow::new(anchor, summaries);

        assert_eq!(window.records().len(), WINDOW_DAYS);
        assert_eq!(window.missing_days(), 6);
        assert_eq!(
            window.records()[2].date,
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
        );
    }
}
