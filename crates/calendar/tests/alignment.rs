use chrono::NaiveDate;
use sdcmap_calendar::{
    CalendarError, TimeWindow, align_to, month_sequence, nearest_index, parse_date,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn fully_covering_driver_keeps_field_order() {
    // Driver runs longer than the field on both ends.
    let driver_dates = month_sequence(date(1999, 6, 1), 36);
    let driver_values: Vec<f64> = (0..36).map(|i| i as f64 * 0.5).collect();
    let field_dates = month_sequence(date(2000, 1, 1), 12);

    let aligned = align_to(&driver_dates, &driver_values, &field_dates).unwrap();

    assert_eq!(aligned.len(), field_dates.len());
    // 2000-01 is 7 months after 1999-06.
    for (k, v) in aligned.iter().enumerate() {
        assert_eq!(*v, (7 + k) as f64 * 0.5);
    }
}

#[test]
fn driver_missing_last_month_fails() {
    let field_dates = month_sequence(date(2000, 1, 1), 12);
    let driver_dates = &field_dates[..10];
    let driver_values: Vec<f64> = (0..10).map(f64::from).collect();

    let err = align_to(driver_dates, &driver_values, &field_dates).unwrap_err();
    assert_eq!(
        err,
        CalendarError::MissingTimestamps {
            count: 2,
            first: date(2000, 11, 1),
        }
    );
}

#[test]
fn driver_with_interior_gap_fails() {
    let field_dates = month_sequence(date(2000, 1, 1), 6);
    let mut driver_dates = field_dates.clone();
    driver_dates.remove(3);
    let driver_values = vec![1.0; driver_dates.len()];

    assert!(matches!(
        align_to(&driver_dates, &driver_values, &field_dates),
        Err(CalendarError::MissingTimestamps { count: 1, .. })
    ));
}

#[test]
fn mid_month_stamps_do_not_match_month_starts() {
    let field_dates = month_sequence(date(2000, 1, 1), 3);
    let driver_dates = vec![date(2000, 1, 15), date(2000, 2, 15), date(2000, 3, 15)];
    assert!(align_to(&driver_dates, &[1.0, 2.0, 3.0], &field_dates).is_err());
}

#[test]
fn peak_resolves_to_closest_month_boundary() {
    let calendar = month_sequence(date(2000, 1, 1), 24);
    let peak = parse_date("2000-06-15").unwrap();
    let idx = nearest_index(&calendar, peak).unwrap();
    assert_eq!(calendar[idx], date(2000, 6, 1));
}

#[test]
fn peak_exact_match() {
    let calendar = month_sequence(date(2014, 1, 1), 60);
    let idx = nearest_index(&calendar, parse_date("2015-11-01").unwrap()).unwrap();
    assert_eq!(idx, 22);
}

#[test]
fn window_filters_sequence() {
    let window = TimeWindow::parse("2000-03-01", "2000-05-01").unwrap();
    let inside: Vec<_> = month_sequence(date(2000, 1, 1), 12)
        .into_iter()
        .filter(|d| window.contains(*d))
        .collect();
    assert_eq!(inside, month_sequence(date(2000, 3, 1), 3));
}
