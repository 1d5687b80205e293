//! Statistical helper functions shared by the correlation engine, the
//! gridpoint filters, and the anomaly computation.

/// Arithmetic mean of a slice. Returns NaN if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean of the finite entries of a slice. Returns NaN if none are finite.
pub fn finite_mean(data: &[f64]) -> f64 {
    let (sum, count) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(s, c), &x| (s + x, c + 1));
    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}

/// Population standard deviation (N denominator) over the finite entries.
///
/// Non-finite entries are skipped. Returns NaN if no entry is finite.
pub fn finite_population_sd(data: &[f64]) -> f64 {
    let m = finite_mean(data);
    if m.is_nan() {
        return f64::NAN;
    }
    let (sum_sq, count) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(s, c), &x| (s + (x - m) * (x - m), c + 1));
    (sum_sq / count as f64).sqrt()
}

/// Number of finite entries.
pub fn finite_count(data: &[f64]) -> usize {
    data.iter().filter(|x| x.is_finite()).count()
}

/// Pearson correlation coefficient.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite.
/// Returns `None` if fewer than 3 finite pairs or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    // Rounding can push |r| a hair past 1 for perfectly collinear input.
    Some((sum_xy / denom).clamp(-1.0, 1.0))
}

/// Subtract the per-calendar-month mean from each value.
///
/// `months` holds the calendar month (1..=12) of each entry. Means are taken
/// over finite values only; NaN entries stay NaN.
///
/// # Panics
///
/// Panics if `values` and `months` differ in length.
pub fn monthly_anomalies(values: &[f64], months: &[u32]) -> Vec<f64> {
    assert_eq!(
        values.len(),
        months.len(),
        "monthly_anomalies: values and months must have equal length"
    );

    let mut sums = [0.0f64; 12];
    let mut counts = [0usize; 12];
    for (&v, &m) in values.iter().zip(months) {
        if v.is_finite() && (1..=12).contains(&m) {
            sums[(m - 1) as usize] += v;
            counts[(m - 1) as usize] += 1;
        }
    }

    values
        .iter()
        .zip(months)
        .map(|(&v, &m)| {
            if !(1..=12).contains(&m) {
                return f64::NAN;
            }
            let k = (m - 1) as usize;
            if counts[k] == 0 {
                f64::NAN
            } else {
                v - sums[k] / counts[k] as f64
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_monthly_index() {
        let pdo = [-0.5, 1.5, 0.25, 0.75];
        assert_relative_eq!(mean(&pdo), 0.5, epsilon = 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn finite_mean_skips_nan() {
        assert_relative_eq!(finite_mean(&[1.0, f64::NAN, 3.0]), 2.0, epsilon = 1e-12);
        assert!(finite_mean(&[f64::NAN]).is_nan());
    }

    #[test]
    fn population_sd_of_finite_values() {
        // Deviations -3, -1, 1, 3 around a mean of 4.
        let data = [1.0, 3.0, f64::NAN, 5.0, 7.0];
        assert_relative_eq!(finite_population_sd(&data), 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(finite_population_sd(&[5.0]), 0.0);
        assert!(finite_population_sd(&[f64::NAN]).is_nan());
    }

    #[test]
    fn population_sd_constant_is_zero() {
        assert_eq!(finite_population_sd(&[0.0, 0.0, f64::NAN, 0.0]), 0.0);
    }

    #[test]
    fn finite_count_ignores_inf() {
        assert_eq!(finite_count(&[1.0, f64::NAN, f64::INFINITY, 2.0]), 2);
    }

    #[test]
    fn pearson_of_scaled_anomalies() {
        let driver = [0.3, -1.2, 0.8, 2.1, -0.4];
        let local: Vec<f64> = driver.iter().map(|v| 3.0 * v - 7.0).collect();
        assert_relative_eq!(
            pearson_correlation(&driver, &local).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn pearson_anti_correlated() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn pearson_constant_is_none() {
        let x = [1.0, 2.0, 3.0];
        let y = [5.0, 5.0, 5.0];
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn pearson_needs_three_finite_pairs() {
        let x = [1.0, 2.0, f64::NAN, 4.0];
        let y = [2.0, f64::NAN, 1.0, 3.0];
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn monthly_anomalies_remove_climatology() {
        // Two years, each month = month number + year offset.
        let months: Vec<u32> = (0..24).map(|i| (i % 12) + 1).collect();
        let values: Vec<f64> = (0..24)
            .map(|i| ((i % 12) + 1) as f64 + if i < 12 { 0.0 } else { 2.0 })
            .collect();
        let anom = monthly_anomalies(&values, &months);
        for (i, a) in anom.iter().enumerate() {
            let expected = if i < 12 { -1.0 } else { 1.0 };
            assert_relative_eq!(*a, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn monthly_anomalies_nan_aware() {
        let anom = monthly_anomalies(&[1.0, f64::NAN, 3.0], &[1, 1, 1]);
        assert_relative_eq!(anom[0], -1.0, epsilon = 1e-12);
        assert!(anom[1].is_nan());
        assert_relative_eq!(anom[2], 1.0, epsilon = 1e-12);
    }
}
