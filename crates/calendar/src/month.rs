//! Date parsing and month-boundary arithmetic.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Parses `YYYY-MM-DD` or `YYYY-MM` (interpreted as the first of the month).
///
/// Surrounding whitespace is ignored, and a trailing time component
/// (`YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`) is discarded.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the string matches neither form.
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = input.trim();
    let date_part = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);

    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Ok(date);
    }

    // `YYYY-MM` has no day field, which chrono refuses to parse on its own.
    let mut parts = date_part.splitn(2, '-');
    if let (Some(y), Some(m)) = (parts.next(), parts.next())
        && let (Ok(year), Ok(month)) = (y.parse::<i32>(), m.parse::<u32>())
        && let Some(date) = NaiveDate::from_ymd_opt(year, month, 1)
    {
        return Ok(date);
    }

    Err(CalendarError::InvalidDate {
        input: input.to_string(),
    })
}

/// Returns the first day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Generates `n` consecutive month-start dates beginning at the month of
/// `start`.
pub fn month_sequence(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let base = start.year() * 12 + start.month0() as i32;
    (0..n as i32)
        .filter_map(|k| {
            let idx = base + k;
            NaiveDate::from_ymd_opt(idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1, 1)
        })
        .collect()
}
