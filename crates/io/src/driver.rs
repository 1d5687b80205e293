//! Driver index series and its text-table readers.

use std::path::Path;

use chrono::NaiveDate;
use sdcmap_calendar::{TimeWindow, ensure_increasing, parse_date};
use tracing::debug;

use crate::error::IoError;

// ---------------------------------------------------------------------------
// DriverSeries
// ---------------------------------------------------------------------------

/// A scalar index stamped by strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DriverSeries {
    /// Creates a series after validating lengths and ordering.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the slices differ in length
    /// and [`IoError::Calendar`] if dates are not strictly increasing.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, IoError> {
        if dates.len() != values.len() {
            return Err(IoError::DimensionMismatch {
                name: "driver values".into(),
                expected: dates.len(),
                got: values.len(),
            });
        }
        ensure_increasing(&dates)?;
        Ok(Self { dates, values })
    }

    /// Creates a series from `(date, value)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Calendar`] if two pairs share a date.
    pub fn from_unsorted(mut pairs: Vec<(NaiveDate, f64)>) -> Result<Self, IoError> {
        pairs.sort_by_key(|&(d, _)| d);
        let (dates, values) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Restricts the series to `window` (inclusive).
    pub fn window(&self, window: &TimeWindow) -> Self {
        let (dates, values) = self
            .dates
            .iter()
            .zip(&self.values)
            .filter(|(d, _)| window.contains(**d))
            .map(|(&d, &v)| (d, v))
            .unzip();
        Self { dates, values }
    }

    /// Timestamps.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values, one per timestamp.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// On-disk layout of a driver index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverFormat {
    /// Two columns `date,value` with a header line.
    Csv,
    /// NOAA PSL table: a `start_year end_year` line, then `year v1 .. v12`
    /// rows, then free-form trailer lines.
    PslTable,
}

/// Reads a driver index, dropping NaN values and values at or below
/// `missing_at_or_below`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file is absent,
/// [`IoError::Parse`] on malformed lines, or [`IoError::Calendar`] on
/// duplicate dates.
pub fn read_driver(
    path: &Path,
    format: DriverFormat,
    missing_at_or_below: f64,
) -> Result<DriverSeries, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Filesystem {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let pairs = match format {
        DriverFormat::Csv => parse_csv(&text, path)?,
        DriverFormat::PslTable => parse_psl_table(&text, path)?,
    };
    let n_raw = pairs.len();
    let kept: Vec<(NaiveDate, f64)> = pairs
        .into_iter()
        .filter(|&(_, v)| !v.is_nan() && v > missing_at_or_below)
        .collect();
    debug!(
        path = %path.display(),
        n_raw,
        n_kept = kept.len(),
        "driver table parsed"
    );

    DriverSeries::from_unsorted(kept)
}

/// Parses `date,value` lines. A first line whose date does not parse is
/// treated as a header.
fn parse_csv(text: &str, path: &Path) -> Result<Vec<(NaiveDate, f64)>, IoError> {
    let mut pairs = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split(',').map(str::trim);
        let date_field = fields.next().unwrap_or_default();
        let value_field = fields.next();

        let date = match parse_date(date_field) {
            Ok(d) => d,
            Err(_) if i == 0 => continue,
            Err(e) => {
                return Err(IoError::Parse {
                    path: path.to_path_buf(),
                    line: i + 1,
                    reason: e.to_string(),
                });
            }
        };
        let value = value_field
            .ok_or_else(|| IoError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                reason: "missing value column".to_string(),
            })?
            .parse::<f64>()
            .map_err(|e| IoError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                reason: format!("bad value: {e}"),
            })?;
        pairs.push((date, value));
    }
    Ok(pairs)
}

/// Parses a PSL monthly table into first-of-month stamps.
fn parse_psl_table(text: &str, path: &Path) -> Result<Vec<(NaiveDate, f64)>, IoError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_no, header) = lines.next().ok_or_else(|| IoError::Parse {
        path: path.to_path_buf(),
        line: 1,
        reason: "empty table".to_string(),
    })?;
    let years: Vec<i32> = header
        .split_whitespace()
        .map(str::parse::<i32>)
        .collect::<Result<_, _>>()
        .map_err(|e| IoError::Parse {
            path: path.to_path_buf(),
            line: header_no + 1,
            reason: format!("bad year range header: {e}"),
        })?;
    let &[first_year, last_year] = years.as_slice() else {
        return Err(IoError::Parse {
            path: path.to_path_buf(),
            line: header_no + 1,
            reason: format!("expected 'start_year end_year', got {} fields", years.len()),
        });
    };

    let mut pairs = Vec::new();
    for (_, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let year = match tokens.first().map(|t| t.parse::<i32>()) {
            Some(Ok(y)) if tokens.len() == 13 && (first_year..=last_year).contains(&y) => y,
            // The table body ends at the first line that is not a year row.
            _ => break,
        };
        for (m, token) in tokens[1..].iter().enumerate() {
            let Ok(value) = token.parse::<f64>() else {
                continue;
            };
            if let Some(date) = NaiveDate::from_ymd_opt(year, m as u32 + 1, 1) {
                pairs.push((date, value));
            }
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn series_rejects_length_mismatch() {
        let err = DriverSeries::new(vec![date(2000, 1, 1)], vec![]).unwrap_err();
        assert!(matches!(err, IoError::DimensionMismatch { .. }));
    }

    #[test]
    fn series_from_unsorted_sorts() {
        let s = DriverSeries::from_unsorted(vec![
            (date(2000, 3, 1), 3.0),
            (date(2000, 1, 1), 1.0),
            (date(2000, 2, 1), 2.0),
        ])
        .unwrap();
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn series_from_unsorted_rejects_duplicates() {
        let err = DriverSeries::from_unsorted(vec![
            (date(2000, 1, 1), 1.0),
            (date(2000, 1, 1), 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, IoError::Calendar { .. }));
    }

    #[test]
    fn series_window() {
        let s = DriverSeries::new(
            vec![date(2000, 1, 1), date(2000, 2, 1), date(2000, 3, 1)],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();
        let w = TimeWindow::parse("2000-02-01", "2000-03-01").unwrap();
        let sub = s.window(&w);
        assert_eq!(sub.dates(), &[date(2000, 2, 1), date(2000, 3, 1)]);
        assert_eq!(sub.values(), &[2.0, 3.0]);
    }

    #[test]
    fn csv_with_header() {
        let text = "date,value\n2015-10-01,2.0\n2015-11-01,2.5\n";
        let pairs = parse_csv(text, Path::new("x.csv")).unwrap();
        assert_eq!(pairs, vec![(date(2015, 10, 1), 2.0), (date(2015, 11, 1), 2.5)]);
    }

    #[test]
    fn csv_without_header() {
        let text = "2015-10-01, 2.0\n\n2015-11-01 , -1.5\n";
        let pairs = parse_csv(text, Path::new("x.csv")).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].1, -1.5);
    }

    #[test]
    fn csv_bad_value_reports_line() {
        let text = "date,value\n2015-10-01,abc\n";
        let err = parse_csv(text, Path::new("x.csv")).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
    }

    #[test]
    fn csv_bad_date_after_header_is_error() {
        let text = "date,value\nsoon,1.0\n";
        assert!(matches!(
            parse_csv(text, Path::new("x.csv")),
            Err(IoError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn psl_table_rows_and_trailer() {
        let text = "1948 1949\n\
            1948 -0.10 0.20 0.30 0.40 0.50 0.60 0.70 0.80 0.90 1.00 1.10 1.20\n\
            1949 -9.90 -0.20 -0.30 -0.40 -0.50 -0.60 -0.70 -0.80 -0.90 -1.00 -1.10 -1.20\n\
            -9.90\n\
            PDO index from some source\n";
        let pairs = parse_psl_table(text, Path::new("pdo.data")).unwrap();
        assert_eq!(pairs.len(), 24);
        assert_eq!(pairs[0], (date(1948, 1, 1), -0.10));
        assert_eq!(pairs[12], (date(1949, 1, 1), -9.90));
        assert_eq!(pairs[23], (date(1949, 12, 1), -1.20));
    }

    #[test]
    fn psl_table_bad_header() {
        let err = parse_psl_table("nineteen forty\n", Path::new("t")).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 1, .. }));
        let err = parse_psl_table("1948\n", Path::new("t")).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 1, .. }));
    }

    #[test]
    fn psl_table_empty() {
        assert!(parse_psl_table("", Path::new("t")).is_err());
    }
}
