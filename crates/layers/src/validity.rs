//! Gridpoint validity filter.

use sdcmap_stats::{finite_count, finite_population_sd};

/// Why a gridpoint was skipped before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than `fragment_size + 3` finite local samples.
    TooFewFinite,
    /// The finite local samples do not vary.
    ZeroVariance,
    /// The local or driver series contains a NaN.
    MissingValues,
}

/// Checks whether a gridpoint may be handed to the correlation engine.
///
/// Returns `Err(reason)` for the first failed check, in the order: finite
/// count, variance, missing values.
pub fn check_gridpoint(
    local: &[f64],
    driver: &[f64],
    fragment_size: usize,
) -> Result<(), SkipReason> {
    if finite_count(local) < fragment_size.saturating_add(3) {
        return Err(SkipReason::TooFewFinite);
    }
    if is_constant(local) {
        return Err(SkipReason::ZeroVariance);
    }
    if local.iter().chain(driver).any(|v| v.is_nan()) {
        return Err(SkipReason::MissingValues);
    }
    Ok(())
}

/// Zero population sd over the finite values. All-equal values count as
/// constant even when rounding in the mean leaves a tiny non-zero sd.
fn is_constant(values: &[f64]) -> bool {
    let mut finite = values.iter().filter(|v| v.is_finite());
    let Some(first) = finite.next() else {
        return true;
    };
    finite.all(|v| v == first) || finite_population_sd(values) == 0.0
}
