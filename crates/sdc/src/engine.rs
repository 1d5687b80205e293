//! The correlation engine contract.

use crate::config::SdcParams;
use crate::error::SdcError;
use crate::fragment::FragmentPair;

/// Produces the fragment-pair table for a driver series and a local series.
///
/// Implementations must be deterministic for fixed inputs and parameters,
/// and must report degenerate fragments as rows with non-finite `r` or
/// `p_value` rather than as errors. They are shared across worker threads
/// during a grid scan, hence the `Send + Sync` bound.
pub trait CorrelationEngine: Send + Sync {
    /// Evaluates every fragment pair allowed by `params`.
    ///
    /// # Errors
    ///
    /// Returns [`SdcError`] for invalid parameters or unequal series lengths.
    fn evaluate(
        &self,
        driver: &[f64],
        local: &[f64],
        params: &SdcParams,
    ) -> Result<Vec<FragmentPair>, SdcError>;
}

impl<F> CorrelationEngine for F
where
    F: Fn(&[f64], &[f64], &SdcParams) -> Result<Vec<FragmentPair>, SdcError> + Send + Sync,
{
    fn evaluate(
        &self,
        driver: &[f64],
        local: &[f64],
        params: &SdcParams,
    ) -> Result<Vec<FragmentPair>, SdcError> {
        self(driver, local, params)
    }
}
