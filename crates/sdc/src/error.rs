//! Error types for the sdcmap-sdc crate.

/// Error type for all fallible operations in the sdcmap-sdc crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SdcError {
    /// Returned when the two input series differ in length.
    #[error("series length mismatch: driver has {driver} values, local has {local}")]
    LengthMismatch {
        /// Length of the driver series.
        driver: usize,
        /// Length of the local series.
        local: usize,
    },

    /// Returned when the fragment size is zero.
    #[error("fragment_size must be >= 1, got {fragment_size}")]
    InvalidFragmentSize {
        /// The invalid fragment size.
        fragment_size: usize,
    },

    /// Returned when the lag range is reversed.
    #[error("min_lag ({min_lag}) must be <= max_lag ({max_lag})")]
    InvalidLagRange {
        /// Smallest lag.
        min_lag: i64,
        /// Largest lag.
        max_lag: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_length_mismatch() {
        let err = SdcError::LengthMismatch {
            driver: 12,
            local: 11,
        };
        assert_eq!(
            err.to_string(),
            "series length mismatch: driver has 12 values, local has 11"
        );
    }

    #[test]
    fn display_invalid_fragment_size() {
        let err = SdcError::InvalidFragmentSize { fragment_size: 0 };
        assert_eq!(err.to_string(), "fragment_size must be >= 1, got 0");
    }

    #[test]
    fn display_invalid_lag_range() {
        let err = SdcError::InvalidLagRange {
            min_lag: 3,
            max_lag: -3,
        };
        assert_eq!(err.to_string(), "min_lag (3) must be <= max_lag (-3)");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<SdcError>();
    }
}
