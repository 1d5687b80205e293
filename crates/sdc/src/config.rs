//! Configuration for SDC evaluation.

use crate::error::SdcError;

/// Parameters for one SDC evaluation.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use sdcmap_sdc::SdcParams;
///
/// let params = SdcParams::new(12)
///     .with_n_permutations(99)
///     .with_two_tailed(true)
///     .with_lag_range(-3, 3);
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SdcParams {
    /// Fragment length in time steps.
    fragment_size: usize,
    /// Number of permutations per fragment pair (0 = Student-t p-value).
    n_permutations: usize,
    /// Two-sided instead of one-sided p-values.
    two_tailed: bool,
    /// Smallest lag tested (`start_1 - start_2`).
    min_lag: i64,
    /// Largest lag tested.
    max_lag: i64,
    /// Base seed for permutation resampling.
    seed: u64,
}

impl SdcParams {
    /// Creates parameters with the given fragment size.
    ///
    /// Defaults: `n_permutations = 49`, one-tailed, lags `-6..=6`, `seed = 42`.
    pub fn new(fragment_size: usize) -> Self {
        Self {
            fragment_size,
            n_permutations: 49,
            two_tailed: false,
            min_lag: -6,
            max_lag: 6,
            seed: 42,
        }
    }

    /// Sets the number of permutations.
    pub fn with_n_permutations(mut self, n: usize) -> Self {
        self.n_permutations = n;
        self
    }

    /// Sets the tail mode.
    pub fn with_two_tailed(mut self, two_tailed: bool) -> Self {
        self.two_tailed = two_tailed;
        self
    }

    /// Sets the inclusive lag range.
    pub fn with_lag_range(mut self, min_lag: i64, max_lag: i64) -> Self {
        self.min_lag = min_lag;
        self.max_lag = max_lag;
        self
    }

    /// Sets the permutation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the fragment size.
    pub fn fragment_size(&self) -> usize {
        self.fragment_size
    }

    /// Returns the number of permutations.
    pub fn n_permutations(&self) -> usize {
        self.n_permutations
    }

    /// Returns whether p-values are two-sided.
    pub fn two_tailed(&self) -> bool {
        self.two_tailed
    }

    /// Returns the smallest lag.
    pub fn min_lag(&self) -> i64 {
        self.min_lag
    }

    /// Returns the largest lag.
    pub fn max_lag(&self) -> i64 {
        self.max_lag
    }

    /// Returns the permutation seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates these parameters.
    ///
    /// Returns an error if `fragment_size` is zero or `min_lag > max_lag`.
    pub fn validate(&self) -> Result<(), SdcError> {
        if self.fragment_size < 1 {
            return Err(SdcError::InvalidFragmentSize {
                fragment_size: self.fragment_size,
            });
        }
        if self.min_lag > self.max_lag {
            return Err(SdcError::InvalidLagRange {
                min_lag: self.min_lag,
                max_lag: self.max_lag,
            });
        }
        Ok(())
    }
}

impl Default for SdcParams {
    fn default() -> Self {
        Self::new(12)
    }
}
