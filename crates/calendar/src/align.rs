//! Reindexing onto a target calendar and nearest-timestamp lookup.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Checks that `dates` is strictly increasing.
///
/// # Errors
///
/// Returns [`CalendarError::NotIncreasing`] at the first violation.
pub fn ensure_increasing(dates: &[NaiveDate]) -> Result<(), CalendarError> {
    for (i, pair) in dates.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CalendarError::NotIncreasing {
                index: i + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

/// Reindexes `values` (stamped by `dates`) onto `target`.
///
/// The result has one entry per target timestamp, in target order. Every
/// target timestamp must be present in `dates` with a non-NaN value; source
/// timestamps outside `target` are dropped.
///
/// # Errors
///
/// Returns [`CalendarError::LengthMismatch`] if `dates` and `values` differ
/// in length, [`CalendarError::NotIncreasing`] if `dates` is not strictly
/// increasing, or [`CalendarError::MissingTimestamps`] if any target
/// timestamp has no usable value.
pub fn align_to(
    dates: &[NaiveDate],
    values: &[f64],
    target: &[NaiveDate],
) -> Result<Vec<f64>, CalendarError> {
    if dates.len() != values.len() {
        return Err(CalendarError::LengthMismatch {
            dates: dates.len(),
            values: values.len(),
        });
    }
    ensure_increasing(dates)?;

    let mut aligned = Vec::with_capacity(target.len());
    let mut missing = 0usize;
    let mut first_missing: Option<NaiveDate> = None;

    for &stamp in target {
        match dates.binary_search(&stamp) {
            Ok(pos) if !values[pos].is_nan() => aligned.push(values[pos]),
            _ => {
                missing += 1;
                first_missing = Some(first_missing.map_or(stamp, |f| f.min(stamp)));
                aligned.push(f64::NAN);
            }
        }
    }

    match first_missing {
        Some(first) => Err(CalendarError::MissingTimestamps {
            count: missing,
            first,
        }),
        None => Ok(aligned),
    }
}

/// Position in `calendar` whose timestamp is closest to `reference`.
///
/// Distance is the absolute difference in days. Ties go to the earliest
/// position (first minimum of a forward scan).
///
/// # Errors
///
/// Returns [`CalendarError::EmptyCalendar`] if `calendar` is empty.
pub fn nearest_index(calendar: &[NaiveDate], reference: NaiveDate) -> Result<usize, CalendarError> {
    let mut best: Option<(usize, i64)> = None;
    for (i, &stamp) in calendar.iter().enumerate() {
        let distance = (stamp - reference).num_days().abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i).ok_or(CalendarError::EmptyCalendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::month_sequence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn increasing_ok() {
        let cal = month_sequence(date(2000, 1, 1), 5);
        assert!(ensure_increasing(&cal).is_ok());
        assert!(ensure_increasing(&[]).is_ok());
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let cal = vec![date(2000, 1, 1), date(2000, 2, 1), date(2000, 2, 1)];
        assert_eq!(
            ensure_increasing(&cal).unwrap_err(),
            CalendarError::NotIncreasing {
                index: 2,
                previous: date(2000, 2, 1),
                current: date(2000, 2, 1),
            }
        );
    }

    #[test]
    fn align_subset_of_source() {
        let src = month_sequence(date(2000, 1, 1), 6);
        let vals = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let target = &src[2..5];
        assert_eq!(align_to(&src, &vals, target).unwrap(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn align_nan_value_counts_as_missing() {
        let src = month_sequence(date(2000, 1, 1), 3);
        let vals = [0.0, f64::NAN, 2.0];
        let err = align_to(&src, &vals, &src).unwrap_err();
        assert_eq!(
            err,
            CalendarError::MissingTimestamps {
                count: 1,
                first: date(2000, 2, 1),
            }
        );
    }

    #[test]
    fn align_length_mismatch() {
        let src = month_sequence(date(2000, 1, 1), 3);
        let err = align_to(&src, &[1.0], &src).unwrap_err();
        assert!(matches!(err, CalendarError::LengthMismatch { .. }));
    }

    #[test]
    fn nearest_prefers_closer_month() {
        let cal = month_sequence(date(2000, 1, 1), 24);
        // June 1 is 14 days away, July 1 is 16 days away.
        assert_eq!(nearest_index(&cal, date(2000, 6, 15)).unwrap(), 5);
    }

    #[test]
    fn nearest_tie_goes_to_earliest() {
        let cal = vec![date(2000, 1, 1), date(2000, 1, 11)];
        assert_eq!(nearest_index(&cal, date(2000, 1, 6)).unwrap(), 0);
    }

    #[test]
    fn nearest_outside_range_clamps() {
        let cal = month_sequence(date(2000, 1, 1), 12);
        assert_eq!(nearest_index(&cal, date(1990, 1, 1)).unwrap(), 0);
        assert_eq!(nearest_index(&cal, date(2030, 1, 1)).unwrap(), 11);
    }

    #[test]
    fn nearest_empty_calendar() {
        assert_eq!(
            nearest_index(&[], date(2000, 1, 1)).unwrap_err(),
            CalendarError::EmptyCalendar
        );
    }
}
