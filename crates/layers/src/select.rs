//! Top-extreme selection by correlation sign.

use sdcmap_sdc::FragmentPair;

/// Sign of a selected correlation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignGroup {
    Positive,
    Negative,
}

impl SignGroup {
    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// The winning group of extreme rows for one gridpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    sign: SignGroup,
    rows: Vec<FragmentPair>,
    rel_offsets: Vec<i64>,
}

impl Selection {
    fn new(sign: SignGroup, rows: Vec<FragmentPair>, peak_index: usize) -> Self {
        let rel_offsets = rows
            .iter()
            .map(|row| row.start_1 as i64 - peak_index as i64)
            .collect();
        Self {
            sign,
            rows,
            rel_offsets,
        }
    }

    pub fn sign(&self) -> SignGroup {
        self.sign
    }

    /// Selected rows, most extreme first.
    pub fn rows(&self) -> &[FragmentPair] {
        &self.rows
    }

    /// `start_1 - peak_index` for each selected row.
    pub fn rel_offsets(&self) -> &[i64] {
        &self.rel_offsets
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn mean_abs_r(&self) -> f64 {
        self.rows.iter().map(|row| row.r.abs()).sum::<f64>() / self.rows.len() as f64
    }
}

/// Picks the dominant group of extreme correlations.
///
/// Rows with `r > 0` and `r < 0` form two groups (`r == 0` joins neither).
/// Each group keeps its `floor(len * top_fraction)` most extreme rows and
/// qualifies only when that count is at least 2. Sorting is stable, so
/// equal coefficients keep their input order. When both groups qualify the
/// one with the larger mean `|r|` wins; on an exact tie the positive group
/// is returned.
///
/// Returns `None` when no group qualifies.
pub fn select_top_extremes(
    rows: &[FragmentPair],
    peak_index: usize,
    top_fraction: f64,
) -> Option<Selection> {
    let mut positive: Vec<FragmentPair> =
        rows.iter().filter(|row| row.r > 0.0).copied().collect();
    let mut negative: Vec<FragmentPair> =
        rows.iter().filter(|row| row.r < 0.0).copied().collect();

    positive.sort_by(|a, b| b.r.total_cmp(&a.r));
    negative.sort_by(|a, b| a.r.total_cmp(&b.r));

    let pos = take_top(positive, top_fraction)
        .map(|rows| Selection::new(SignGroup::Positive, rows, peak_index));
    let neg = take_top(negative, top_fraction)
        .map(|rows| Selection::new(SignGroup::Negative, rows, peak_index));

    match (pos, neg) {
        (Some(p), Some(n)) => {
            if n.mean_abs_r() > p.mean_abs_r() {
                Some(n)
            } else {
                Some(p)
            }
        }
        (p, n) => p.or(n),
    }
}

/// Truncates a sorted group to its top share, or `None` below two rows.
fn take_top(mut sorted: Vec<FragmentPair>, top_fraction: f64) -> Option<Vec<FragmentPair>> {
    let count = (sorted.len() as f64 * top_fraction).floor() as usize;
    if count < 2 {
        return None;
    }
    sorted.truncate(count);
    Some(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(start_1: usize, lag: i64, r: f64) -> FragmentPair {
        FragmentPair {
            start_1,
            stop_1: start_1 + 4,
            start_2: (start_1 as i64 - lag) as usize,
            stop_2: (start_1 as i64 - lag) as usize + 4,
            lag,
            r,
            p_value: 0.01,
        }
    }

    #[test]
    fn single_qualifying_group() {
        let rows = [
            row(5, 0, 0.9),
            row(6, 1, 0.7),
            row(7, 2, 0.4),
            row(8, 3, 0.1),
            row(5, 0, -0.6),
            row(8, 3, -0.2),
        ];
        // POS: floor(4 * 0.5) = 2 qualifies; NEG: floor(2 * 0.5) = 1 does not.
        let sel = select_top_extremes(&rows, 5, 0.5).unwrap();
        assert_eq!(sel.sign(), SignGroup::Positive);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.rows()[0].r, 0.9);
        assert_eq!(sel.rows()[1].r, 0.7);
        assert_eq!(sel.rel_offsets(), &[0, 1]);
    }

    #[test]
    fn both_groups_below_two_is_none() {
        let rows = [
            row(0, 0, 0.9),
            row(1, 0, 0.7),
            row(2, 0, 0.4),
            row(3, 0, -0.6),
            row(4, 0, -0.2),
            row(5, 0, -0.1),
        ];
        // floor(3 * 0.5) = 1 on both sides.
        assert!(select_top_extremes(&rows, 0, 0.5).is_none());
    }

    #[test]
    fn stronger_mean_magnitude_wins_over_size() {
        let rows = [
            row(0, 0, 0.3),
            row(1, 0, 0.3),
            row(2, 0, 0.3),
            row(3, 0, 0.3),
            row(4, 0, -0.8),
            row(5, 0, -0.9),
        ];
        let sel = select_top_extremes(&rows, 2, 1.0).unwrap();
        assert_eq!(sel.sign(), SignGroup::Negative);
        assert_eq!(sel.len(), 2);
        // Most negative first.
        assert_eq!(sel.rows()[0].r, -0.9);
        assert_eq!(sel.rel_offsets(), &[3, 2]);
        assert_relative_eq!(sel.sign().sign(), -1.0);
    }

    #[test]
    fn zero_correlation_in_neither_group() {
        let rows = [row(0, 0, 0.0), row(1, 0, 0.0), row(2, 0, 0.0)];
        assert!(select_top_extremes(&rows, 0, 1.0).is_none());
    }

    #[test]
    fn equal_coefficients_keep_input_order() {
        let rows = [row(4, 0, 0.5), row(2, 0, 0.5), row(9, 0, 0.5)];
        let sel = select_top_extremes(&rows, 0, 1.0).unwrap();
        let starts: Vec<usize> = sel.rows().iter().map(|r| r.start_1).collect();
        assert_eq!(starts, vec![4, 2, 9]);
    }

    #[test]
    fn negative_offsets_allowed() {
        let rows = [row(1, 0, 0.8), row(2, 0, 0.7)];
        let sel = select_top_extremes(&rows, 10, 1.0).unwrap();
        assert_eq!(sel.rel_offsets(), &[-9, -8]);
    }

    #[test]
    fn empty_input() {
        assert!(select_top_extremes(&[], 0, 1.0).is_none());
    }
}
