//! Resolve the day/month-only dates statements print into full dates.
//!
//! The statement never prints a year next to a transaction, so the year is
//! recovered from context: the statement period bounds anchor entry dates,
//! and the nearby entry date anchors the value date.

use chrono::{Datelike, NaiveDate};

use crate::error::ParseError;
use crate::types::StatementPeriod;

fn with_year(text: &str, year: i32) -> Option<NaiveDate> {
    // Example: "15.10"
    let (day, month) = text.split_once('.')?;
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Pick the statement-period year that makes a printed `DD.MM` a real entry
/// date inside `[start, end]`.
///
/// `Ok(None)` means the text is not a valid calendar date in either candidate
/// year (column noise like `"48.00"`); callers ignore the fragment. A real
/// date that lands outside the period is a hard error.
pub fn resolve_entry_date(
    text: &str,
    period: &StatementPeriod,
) -> Result<Option<NaiveDate>, ParseError> {
    let mut saw_real_date = false;
    for year in [period.start.year(), period.end.year()] {
        let Some(date) = with_year(text, year) else {
            continue;
        };
        saw_real_date = true;
        if period.start <= date && date <= period.end {
            return Ok(Some(date));
        }
    }

    if saw_real_date {
        Err(ParseError::DateOutOfRange {
            text: text.to_string(),
            start: period.start,
            end: period.end,
        })
    } else {
        Ok(None)
    }
}

/// Resolve a printed value date against the entry date it settles: same year
/// first, then the next (for periods spanning new year), accepting the first
/// candidate within a week of the entry date.
pub fn resolve_value_date(text: &str, entry_date: NaiveDate) -> Result<NaiveDate, ParseError> {
    for year in [entry_date.year(), entry_date.year() + 1] {
        let Some(date) = with_year(text, year) else {
            continue;
        };
        if date.signed_duration_since(entry_date).num_days().abs() < 7 {
            return Ok(date);
        }
    }

    Err(ParseError::ValueDateUnresolved {
        text: text.to_string(),
        entry_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn autumn_2016() -> StatementPeriod {
        StatementPeriod {
            start: date(2016, 9, 1),
            end: date(2016, 11, 30),
        }
    }

    #[test]
    fn test_entry_date_anchored_to_start_year() {
        let resolved = resolve_entry_date("15.10", &autumn_2016()).unwrap();
        assert_eq!(resolved, Some(date(2016, 10, 15)));
    }

    #[test]
    fn test_entry_date_falls_back_to_end_year() {
        // Period crosses new year; "15.01" only fits the end year.
        let period = StatementPeriod {
            start: date(2016, 12, 1),
            end: date(2017, 2, 28),
        };
        let resolved = resolve_entry_date("15.01", &period).unwrap();
        assert_eq!(resolved, Some(date(2017, 1, 15)));
    }

    #[test]
    fn test_entry_date_not_a_calendar_date_is_ignored() {
        assert_eq!(resolve_entry_date("48.00", &autumn_2016()).unwrap(), None);
    }

    #[test]
    fn test_entry_date_outside_period_is_an_error() {
        let err = resolve_entry_date("15.03", &autumn_2016()).unwrap_err();
        assert!(matches!(err, ParseError::DateOutOfRange { .. }));
    }

    #[test]
    fn test_value_date_same_year() {
        let resolved = resolve_value_date("16.10", date(2016, 10, 15)).unwrap();
        assert_eq!(resolved, date(2016, 10, 16));
    }

    #[test]
    fn test_value_date_rolls_into_next_year() {
        let resolved = resolve_value_date("02.01", date(2016, 12, 30)).unwrap();
        assert_eq!(resolved, date(2017, 1, 2));
    }

    #[test]
    fn test_value_date_shortly_before_entry_is_accepted() {
        let resolved = resolve_value_date("14.10", date(2016, 10, 15)).unwrap();
        assert_eq!(resolved, date(2016, 10, 14));
    }

    #[test]
    fn test_value_date_too_far_from_entry() {
        let err = resolve_value_date("01.09", date(2016, 10, 15)).unwrap_err();
        assert!(matches!(err, ParseError::ValueDateUnresolved { .. }));
    }
}
