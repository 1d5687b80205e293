//! Eight-statistic summary of one gridpoint's selection.

use sdcmap_stats::mean;

use crate::select::Selection;

/// Summary statistics of a gridpoint's selected extremes.
///
/// All eight fields are produced together from a non-empty [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridpointSummary {
    /// Mean correlation of the selected rows.
    pub corr_mean: f64,
    /// Mean peak-relative start offset.
    pub driver_rel_time_mean: f64,
    /// Mean lag.
    pub lag_mean: f64,
    /// `driver_rel_time_mean + lag_mean`.
    pub timing_combo: f64,
    /// Max minus min peak-relative offset.
    pub strong_span: f64,
    /// Min peak-relative offset.
    pub strong_start: f64,
    /// `+1.0` for the positive group, `-1.0` for the negative group.
    pub dominant_sign: f64,
    /// Number of selected rows.
    pub n_selected: f64,
}

impl GridpointSummary {
    /// Summarises a selection, or `None` if it is empty.
    pub fn from_selection(selection: &Selection) -> Option<Self> {
        if selection.is_empty() {
            return None;
        }
        let rows = selection.rows();
        let rel: Vec<f64> = selection.rel_offsets().iter().map(|&o| o as f64).collect();
        let r: Vec<f64> = rows.iter().map(|row| row.r).collect();
        let lags: Vec<f64> = rows.iter().map(|row| row.lag as f64).collect();

        let driver_rel_time_mean = mean(&rel);
        let lag_mean = mean(&lags);
        let min_rel = selection.rel_offsets().iter().copied().min()?;
        let max_rel = selection.rel_offsets().iter().copied().max()?;

        Some(Self {
            corr_mean: mean(&r),
            driver_rel_time_mean,
            lag_mean,
            timing_combo: driver_rel_time_mean + lag_mean,
            strong_span: (max_rel - min_rel) as f64,
            strong_start: min_rel as f64,
            dominant_sign: selection.sign().sign(),
            n_selected: selection.len() as f64,
        })
    }

    /// Field values in [`LayerKind::ALL`](crate::LayerKind::ALL) order.
    pub fn values(&self) -> [f64; 8] {
        [
            self.corr_mean,
            self.driver_rel_time_mean,
            self.lag_mean,
            self.timing_combo,
            self.strong_span,
            self.strong_start,
            self.dominant_sign,
            self.n_selected,
        ]
    }
}
