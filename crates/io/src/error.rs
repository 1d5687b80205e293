//! Error types for sdcmap-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the sdcmap-io crate.
///
/// This enum covers filesystem and download failures, NetCDF errors, text
/// parsing problems in driver tables, calendar issues, and shape mismatches
/// encountered when reading fields or writing layer archives.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a filesystem error.
    #[error("i/o error on {}: {reason}", path.display())]
    Filesystem {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a download fails.
    #[error("download of {url} failed: {reason}")]
    Http {
        /// URL being fetched.
        url: String,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a file is missing and downloads are disabled.
    #[error("{} is not cached and offline mode is enabled", path.display())]
    Offline {
        /// Expected cache location.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the sdcmap-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when a line of a text table cannot be parsed.
    #[error("parse error in {} line {line}: {reason}", path.display())]
    Parse {
        /// Path of the file being parsed.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a dataset key is not in the registry.
    #[error("unknown {kind} dataset '{key}' (available: {available})")]
    UnknownDataset {
        /// `"driver"` or `"field"`.
        kind: &'static str,
        /// The key that was requested.
        key: String,
        /// Comma-separated list of known keys.
        available: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<sdcmap_calendar::CalendarError> for IoError {
    fn from(e: sdcmap_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}
