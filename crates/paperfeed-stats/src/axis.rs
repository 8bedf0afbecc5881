//! Labels for the trend chart's date axis.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Tick labels and an optional title carrying what the labels omit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateAxis {
    /// One label per date.
    pub labels: Vec<String>,
    /// `YYYY/MM` when all dates share a month, `YYYY` when they share a year.
    pub title: Option<String>,
}

impl DateAxis {
    /// Builds the axis for ascending `dates`, judged by the first and last date.
    pub fn new(dates: &[NaiveDate]) -> Self {
        let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
            return Self {
                labels: Vec::new(),
                title: None,
            };
        };
        let same_year = first.year() == last.year();
        let same_month = same_year && first.month() == last.month();

        let (format, title) = if same_month {
            ("%d", Some(first.format("%Y/%m").to_string()))
        } else if same_year {
            ("%m-%d", Some(first.format("%Y").to_string()))
        } else {
            ("%Y-%m-%d", None)
        };
        Self {
            labels: dates.iter().map(|d| d.format(format).to_string()).collect(),
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_month_shows_days() {
        let axis = DateAxis::new(&[date(2025, 3, 1), date(2025, 3, 9)]);
        assert_eq!(axis.labels, vec!["01", "09"]);
        assert_eq!(axis.title.as_deref(), Some("2025/03"));
    }

    #[test]
    fn same_year_shows_month_day() {
        let axis = DateAxis::new(&[date(2025, 2, 28), date(2025, 3, 1)]);
        assert_eq!(axis.labels, vec!["02-28", "03-01"]);
        assert_eq!(axis.title.as_deref(), Some("2025"));
    }

    #[test]
    fn across_years_shows_full_dates() {
        let axis = DateAxis::new(&[date(2024, 12, 31), date(2025, 1, 1)]);
        assert_eq!(axis.labels, vec!["2024-12-31", "2025-01-01"]);
        assert_eq!(axis.title, None);
    }

    #[test]
    fn empty() {
        assert!(DateAxis::new(&[]).labels.is_empty());
    }
}
