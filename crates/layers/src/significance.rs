//! Significance filter over engine output.

use sdcmap_sdc::FragmentPair;

/// Keeps rows whose `r` and `p_value` are finite and `p_value <= alpha`,
/// preserving input order.
pub fn significant_rows(rows: &[FragmentPair], alpha: f64) -> Vec<FragmentPair> {
    rows.iter()
        .filter(|row| row.is_finite() && row.p_value <= alpha)
        .copied()
        .collect()
}
