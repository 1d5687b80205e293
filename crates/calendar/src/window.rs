//! Inclusive time window.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::month::parse_date;

/// An inclusive `[start, end]` date range used to subset both the driver
/// series and the mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TimeWindow {
    /// Creates a window from two dates.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidWindow`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a window from two date strings (see [`parse_date`]).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if either string fails to parse or the
    /// range is reversed.
    pub fn parse(start: &str, end: &str) -> Result<Self, CalendarError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Window start (inclusive).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Window end (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for TimeWindow {
    /// 2014-01-01 through 2018-12-01.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2018, 12, 1).unwrap_or_default(),
        }
    }
}
