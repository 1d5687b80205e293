//! Error types for the sdcmap-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the sdcmap-calendar crate.
///
/// This enum covers date parsing failures, malformed time axes, and
/// reindexing a series onto a calendar it does not fully cover.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a date string cannot be parsed.
    #[error("invalid date: '{input}' (expected YYYY-MM-DD or YYYY-MM)")]
    InvalidDate {
        /// The string that failed to parse.
        input: String,
    },

    /// Returned when a time window ends before it starts.
    #[error("invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// Returned when a time axis is not strictly increasing.
    #[error("timestamps not strictly increasing at index {index}: {previous} then {current}")]
    NotIncreasing {
        /// Index of the offending timestamp.
        index: usize,
        /// Timestamp preceding the offending one.
        previous: NaiveDate,
        /// The offending timestamp.
        current: NaiveDate,
    },

    /// Returned when timestamps and values differ in length.
    #[error("length mismatch: {dates} timestamps but {values} values")]
    LengthMismatch {
        /// Number of timestamps.
        dates: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when a series cannot be reindexed onto a calendar without
    /// introducing missing values.
    #[error("{count} timestamp(s) have no value after alignment (first: {first})")]
    MissingTimestamps {
        /// Number of target timestamps without a finite source value.
        count: usize,
        /// The earliest such timestamp.
        first: NaiveDate,
    },

    /// Returned when an operation needs at least one timestamp.
    #[error("calendar is empty")]
    EmptyCalendar,
}
