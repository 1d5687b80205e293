//! # sdcmap-sdc
//!
//! Scale-dependent correlation (SDC) between two equally long series.
//!
//! Both series are cut into fragments of a fixed length. Every pair of
//! fragments whose start offsets differ by a lag inside the configured range
//! is correlated, and each coefficient gets a p-value from a permutation test
//! (or a Student-t test when no permutations are requested).
//!
//! The [`CorrelationEngine`] trait is the seam the gridpoint scan calls
//! through; [`PermutationEngine`] is the built-in implementation. Any
//! `Fn(&[f64], &[f64], &SdcParams) -> Result<Vec<FragmentPair>, SdcError>`
//! closure is also an engine, which keeps test stubs short.
//!
//! Degenerate fragments (zero variance) never fail the call: their rows
//! carry `r = NaN` and `p_value = NaN` and are expected to be filtered by
//! the caller.

mod config;
mod engine;
mod error;
mod fragment;
mod permutation;

pub use config::SdcParams;
pub use engine::CorrelationEngine;
pub use error::SdcError;
pub use fragment::FragmentPair;
pub use permutation::PermutationEngine;
