use chrono::NaiveDate;
use thiserror::Error;

/// Domain errors that stop a comparison before or during planning.
///
/// Per-day provider failures are not represented here: they become gaps in
/// the fetched window instead of errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompareError {
    #[error("Place not found: '{0}'")]
    PlaceNotFound(String),

    #[error("Invalid date format: '{0}'. Please use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Coordinates out of range: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),

    #[error("A 7-day window starting at {0} runs past the supported calendar range")]
    DateOutOfRange(NaiveDate),
}
