use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{dates::Anchor, model::WeatherWindow};

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn convert_kelvin(&self, kelvin: f64) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => kelvin_to_fahrenheit(kelvin),
            TemperatureUnit::Celsius => kelvin_to_celsius(kelvin),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Celsius => "celsius",
        })
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: fahrenheit, celsius."
            )),
        }
    }
}

/// Max temperatures of one window, with days lacking data dropped.
///
/// `dates` and `temperatures` are always the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub anchor: Anchor,
    pub unit: TemperatureUnit,
    pub dates: Vec<NaiveDate>,
    pub temperatures: Vec<f64>,
}

impl ComparisonSeries {
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.temperatures.iter().copied())
    }

    /// Temperature on `date`, if that day survived filtering.
    pub fn temperature_on(&self, date: NaiveDate) -> Option<f64> {
        self.points().find(|(d, _)| *d == date).map(|(_, t)| t)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

pub fn extract_max_temperatures(
    window: &WeatherWindow,
    unit: TemperatureUnit,
) -> ComparisonSeries {
    let (dates, temperatures) = window
        .records()
        .iter()
        .filter_map(|record| {
            let kelvin = record.summary.as_ref()?.max_kelvin()?;
            Some((record.date, unit.convert_kelvin(kelvin)))
        })
        .unzip();

    ComparisonSeries {
        anchor: window.anchor,
        unit,
        dates,
        temperatures,
    }
}
