use approx::assert_relative_eq;
use sdcmap_sdc::{CorrelationEngine, PermutationEngine, SdcError, SdcParams};

/// Deterministic pseudo-noise in [-1, 1].
fn noise(n: usize, salt: u64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = ((i as u64 + 1) * 2_654_435_761 + salt * 97) % 1000;
            x as f64 / 500.0 - 1.0
        })
        .collect()
}

#[test]
fn row_count_respects_lag_window() {
    let x = noise(10, 1);
    let y = noise(10, 2);
    let params = SdcParams::new(4).with_lag_range(-1, 1).with_n_permutations(5);

    let rows = PermutationEngine.evaluate(&x, &y, &params).unwrap();

    // 7 start positions per series: 7 at lag 0, 6 at lag +1, 6 at lag -1.
    assert_eq!(rows.len(), 19);
    for row in &rows {
        assert_eq!(row.lag, row.start_1 as i64 - row.start_2 as i64);
        assert!((-1..=1).contains(&row.lag));
        assert_eq!(row.stop_1 - row.start_1, 4);
        assert_eq!(row.stop_2 - row.start_2, 4);
        assert!(row.stop_1 <= 10 && row.stop_2 <= 10);
    }
}

#[test]
fn rows_are_start_1_major() {
    let x = noise(8, 3);
    let y = noise(8, 4);
    let params = SdcParams::new(3).with_lag_range(-5, 5).with_n_permutations(0);
    let rows = PermutationEngine.evaluate(&x, &y, &params).unwrap();
    let keys: Vec<(usize, usize)> = rows.iter().map(|r| (r.start_1, r.start_2)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn same_seed_same_table() {
    let x = noise(24, 5);
    let y = noise(24, 6);
    let params = SdcParams::new(6).with_n_permutations(29).with_seed(11);

    let a = PermutationEngine.evaluate(&x, &y, &params).unwrap();
    let b = PermutationEngine.evaluate(&x, &y, &params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn identical_fragments_are_significant() {
    let x: Vec<f64> = noise(16, 7);
    let params = SdcParams::new(8)
        .with_lag_range(0, 0)
        .with_n_permutations(49);

    let rows = PermutationEngine.evaluate(&x, &x, &params).unwrap();
    assert_eq!(rows.len(), 9);
    for row in rows {
        assert_relative_eq!(row.r, 1.0, epsilon = 1e-12);
        assert!(row.p_value <= 0.05, "p = {}", row.p_value);
    }
}

#[test]
fn p_values_are_probabilities() {
    let x = noise(20, 8);
    let y = noise(20, 9);
    for two_tailed in [false, true] {
        let params = SdcParams::new(5)
            .with_two_tailed(two_tailed)
            .with_n_permutations(19);
        for row in PermutationEngine.evaluate(&x, &y, &params).unwrap() {
            assert!(row.p_value > 0.0 && row.p_value <= 1.0);
            assert!((-1.0..=1.0).contains(&row.r));
        }
    }
}

#[test]
fn constant_fragments_yield_nan_rows() {
    let x = noise(12, 10);
    let y = vec![3.0; 12];
    let params = SdcParams::new(4).with_lag_range(0, 0);

    let rows = PermutationEngine.evaluate(&x, &y, &params).unwrap();
    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|r| r.r.is_nan() && r.p_value.is_nan()));
}

#[test]
fn fragment_longer_than_series_is_empty() {
    let x = noise(6, 1);
    let params = SdcParams::new(7);
    assert!(PermutationEngine.evaluate(&x, &x, &params).unwrap().is_empty());
}

#[test]
fn length_mismatch_is_error() {
    let params = SdcParams::new(3);
    let err = PermutationEngine
        .evaluate(&noise(10, 1), &noise(9, 1), &params)
        .unwrap_err();
    assert_eq!(
        err,
        SdcError::LengthMismatch {
            driver: 10,
            local: 9
        }
    );
}

#[test]
fn invalid_params_are_rejected() {
    let x = noise(10, 1);
    assert!(matches!(
        PermutationEngine.evaluate(&x, &x, &SdcParams::new(0)),
        Err(SdcError::InvalidFragmentSize { .. })
    ));
    assert!(matches!(
        PermutationEngine.evaluate(&x, &x, &SdcParams::new(3).with_lag_range(1, 0)),
        Err(SdcError::InvalidLagRange { .. })
    ));
}
