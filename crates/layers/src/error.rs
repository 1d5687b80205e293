//! Error types for sdcmap-layers.

/// Error type for all fallible operations in the sdcmap-layers crate.
///
/// Per-gridpoint degeneracy is never an error; it is encoded as NaN in the
/// output layers. Errors here abort the whole scan before any cell is
/// written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayerError {
    /// Returned when one or more configuration checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when the driver cannot be reindexed onto the field calendar,
    /// or the calendar cannot resolve the peak reference.
    #[error("driver/field alignment failed: {reason}")]
    Alignment {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error returned by the correlation engine.
    #[error("correlation engine error: {reason}")]
    Engine {
        /// Description of the underlying engine failure.
        reason: String,
    },

    /// Returned when the run summary cannot be serialised.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

impl From<sdcmap_calendar::CalendarError> for LayerError {
    fn from(e: sdcmap_calendar::CalendarError) -> Self {
        LayerError::Alignment {
            reason: e.to_string(),
        }
    }
}

impl From<sdcmap_sdc::SdcError> for LayerError {
    fn from(e: sdcmap_sdc::SdcError) -> Self {
        LayerError::Engine {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn display_validation() {
        let err = LayerError::Validation {
            count: 2,
            details: "alpha must be in (0, 1]; top_fraction must be in (0, 1]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): alpha must be in (0, 1]; top_fraction must be in (0, 1]"
        );
    }

    #[test]
    fn from_calendar_error_is_alignment() {
        let cal = sdcmap_calendar::CalendarError::MissingTimestamps {
            count: 1,
            first: NaiveDate::from_ymd_opt(2000, 6, 1).unwrap(),
        };
        let err: LayerError = cal.into();
        assert!(matches!(err, LayerError::Alignment { .. }));
        assert!(err.to_string().starts_with("driver/field alignment failed"));
        assert!(err.to_string().contains("2000-06-01"));
    }

    #[test]
    fn from_sdc_error_is_engine() {
        let err: LayerError = sdcmap_sdc::SdcError::InvalidFragmentSize { fragment_size: 0 }.into();
        assert_eq!(
            err.to_string(),
            "correlation engine error: fragment_size must be >= 1, got 0"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<LayerError>();
    }
}
