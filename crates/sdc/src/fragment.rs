//! One row of an SDC result table.

/// A tested pair of fragments.
///
/// `start_*` and `stop_*` index into the driver (`_1`) and local (`_2`)
/// series; stops are exclusive. `lag` is `start_1 - start_2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentPair {
    pub start_1: usize,
    pub stop_1: usize,
    pub start_2: usize,
    pub stop_2: usize,
    pub lag: i64,
    pub r: f64,
    pub p_value: f64,
}

impl FragmentPair {
    /// Whether both `r` and `p_value` are finite.
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.p_value.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(r: f64, p_value: f64) -> FragmentPair {
        FragmentPair {
            start_1: 0,
            stop_1: 4,
            start_2: 1,
            stop_2: 5,
            lag: -1,
            r,
            p_value,
        }
    }

    #[test]
    fn finite_row() {
        assert!(row(0.5, 0.01).is_finite());
    }

    #[test]
    fn nan_r_or_p_is_not_finite() {
        assert!(!row(f64::NAN, 0.01).is_finite());
        assert!(!row(0.5, f64::NAN).is_finite());
        assert!(!row(f64::INFINITY, 0.01).is_finite());
    }
}
