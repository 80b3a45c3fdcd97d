//! Calendar arithmetic for the comparison windows.
//!
//! Everything here is pure: no I/O, no clock. The caller supplies the start
//! date (usually typed by the user, or today's date).

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::CompareError;

/// Number of consecutive days fetched per anchor.
pub const WINDOW_DAYS: usize = 7;

/// Baseline year used when neither the command line nor the config names one.
pub const DEFAULT_BASELINE_YEAR: i32 = 1981;

/// Parse a user-typed `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, CompareError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CompareError::InvalidDate(trimmed.to_string()))
}

/// Move `date` into `year`, keeping month and day.
///
/// February 29 becomes February 28 when `year` is not a leap year. Any other
/// month/day pair copied from a real date is valid in every year, so the only
/// remaining failure is a year outside chrono's range.
pub fn shift_to_year(date: NaiveDate, year: i32) -> Result<NaiveDate, CompareError> {
    if let Some(shifted) = date.with_year(year) {
        return Ok(shifted);
    }

    if date.month() == 2 && date.day() == 29 {
        if let Some(fallback) = NaiveDate::from_ymd_opt(year, 2, 28) {
            return Ok(fallback);
        }
    }

    Err(CompareError::YearOutOfRange(year))
}

/// A base date plus the [`WINDOW_DAYS`] consecutive days starting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
}

impl DateWindow {
    /// Fails if the last day of the window cannot be represented.
    pub fn new(start: NaiveDate) -> Result<Self, CompareError> {
        start
            .checked_add_days(Days::new(WINDOW_DAYS as u64 - 1))
            .ok_or(CompareError::DateOutOfRange(start))?;

        Ok(Self { start })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(WINDOW_DAYS as u64 - 1)
    }

    pub fn dates(&self) -> [NaiveDate; WINDOW_DAYS] {
        std::array::from_fn(|offset| self.start + Days::new(offset as u64))
    }
}

/// Which reference year a window stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Current,
    OneYearAgo,
    TenYearsAgo,
    Baseline,
}

impl AnchorKind {
    pub fn description(&self) -> &'static str {
        match self {
            AnchorKind::Current => "requested year",
            AnchorKind::OneYearAgo => "one year earlier",
            AnchorKind::TenYearsAgo => "ten years earlier",
            AnchorKind::Baseline => "baseline year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub kind: AnchorKind,
    pub window: DateWindow,
}

impl Anchor {
    pub fn date(&self) -> NaiveDate {
        self.window.start()
    }

    /// Column/legend label: the anchor's year.
    pub fn label(&self) -> String {
        self.date().year().to_string()
    }
}

/// The four anchors of a comparison, in display order.
pub fn anchors(start: NaiveDate, baseline_year: i32) -> Result<[Anchor; 4], CompareError> {
    let year = start.year();

    let make = |kind: AnchorKind, date: NaiveDate| -> Result<Anchor, CompareError> {
        Ok(Anchor {
            kind,
            window: DateWindow::new(date)?,
        })
    };

    Ok([
        make(AnchorKind::Current, start)?,
        make(AnchorKind::OneYearAgo, shift_to_year(start, year - 1)?)?,
        make(AnchorKind::TenYearsAgo, shift_to_year(start, year - 10)?)?,
        make(AnchorKind::Baseline, shift_to_year(start, baseline_year)?)?,
    ])
}
