use std::fmt;

use tempcompare_core::{ComparisonReport, WINDOW_DAYS};

const COLUMN_WIDTH: usize = 10;

/// Plain-text table: one row per day of the window, one column per year.
pub struct ReportTable<'a>(pub &'a ComparisonReport);

impl fmt::Display for ReportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let unit = report.unit.symbol();

        writeln!(f, "7-Day Maximum Temperature Comparison for {}", report.place)?;
        writeln!(
            f,
            "Location: {} ({:.4}, {:.4})",
            report.location.display_name(),
            report.location.latitude(),
            report.location.longitude(),
        )?;
        writeln!(f)?;

        write!(f, "{:<8}", "Day")?;
        for series in &report.series {
            write!(f, "{:>width$}", series.anchor.label(), width = COLUMN_WIDTH)?;
        }
        writeln!(f)?;

        for day in 0..WINDOW_DAYS {
            let row_date = report
                .series
                .first()
                .map(|s| s.anchor.window.dates()[day].format("%b %d").to_string())
                .unwrap_or_default();
            write!(f, "{row_date:<8}")?;

            for series in &report.series {
                let date = series.anchor.window.dates()[day];
                let cell = match series.temperature_on(date) {
                    Some(t) => format!("{t:.1}{unit}"),
                    None => "-".to_string(),
                };
                write!(f, "{cell:>width$}", width = COLUMN_WIDTH)?;
            }
            writeln!(f)?;
        }

        let empty: Vec<String> = report
            .series
            .iter()
            .filter(|s| s.is_empty())
            .map(|s| format!("{} ({})", s.anchor.label(), s.anchor.kind.description()))
            .collect();
        if !empty.is_empty() {
            writeln!(f)?;
            writeln!(f, "No temperature data for: {}", empty.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempcompare_core::{Anchor, ComparisonSeries, Location, TemperatureUnit, anchors};

    fn report() -> ComparisonReport {
        let start = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let [current, one, ten, baseline] = anchors(start, 1979).unwrap();

        let full = |anchor: Anchor, temp: f64| ComparisonSeries {
            anchor,
            unit: TemperatureUnit::Fahrenheit,
            dates: anchor.window.dates().to_vec(),
            temperatures: vec![temp; WINDOW_DAYS],
        };

        let mut gappy = full(current, 50.0);
        gappy.dates.remove(1);
        gappy.temperatures.remove(1);

        ComparisonReport {
            place: "Paris, France".into(),
            location: Location::new("Paris", 48.8588897, 2.320041)
                .unwrap()
                .with_region(None, Some("FR".into())),
            start,
            baseline_year: 1979,
            unit: TemperatureUnit::Fahrenheit,
            series: vec![
                gappy,
                full(one, 41.5),
                full(ten, 39.0),
                ComparisonSeries {
                    anchor: baseline,
                    unit: TemperatureUnit::Fahrenheit,
                    dates: vec![],
                    temperatures: vec![],
                },
            ],
        }
    }

    #[test]
    fn renders_header_and_year_columns() {
        let text = ReportTable(&report()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "7-Day Maximum Temperature Comparison for Paris, France");
        assert_eq!(lines[1], "Location: Paris, FR (48.8589, 2.3200)");
        assert!(lines[3].starts_with("Day"));
        for year in ["2024", "2023", "2014", "1979"] {
            assert!(lines[3].contains(year));
        }
    }

    #[test]
    fn renders_gaps_as_dashes() {
        let text = ReportTable(&report()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[4].starts_with("Feb 29"));
        assert!(lines[4].contains("50.0°F"));
        assert!(lines[4].contains("41.5°F"));

        let second_day: Vec<&str> = lines[5].split_whitespace().collect();
        assert_eq!(second_day, ["Mar", "01", "-", "41.5°F", "39.0°F", "-"]);
    }

    #[test]
    fn lists_years_without_any_data() {
        let text = ReportTable(&report()).to_string();
        assert!(text.contains("No temperature data for: 1979 (baseline year)"));
    }
}
