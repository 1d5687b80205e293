//! The eight named output layers.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::summary::GridpointSummary;

/// One of the eight per-gridpoint statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    CorrMean,
    DriverRelTimeMean,
    LagMean,
    TimingCombo,
    StrongSpan,
    StrongStart,
    DominantSign,
    NSelected,
}

impl LayerKind {
    /// Every layer, in output order.
    pub const ALL: [LayerKind; 8] = [
        LayerKind::CorrMean,
        LayerKind::DriverRelTimeMean,
        LayerKind::LagMean,
        LayerKind::TimingCombo,
        LayerKind::StrongSpan,
        LayerKind::StrongStart,
        LayerKind::DominantSign,
        LayerKind::NSelected,
    ];

    /// Stable string key used in archives and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CorrMean => "corr_mean",
            Self::DriverRelTimeMean => "driver_rel_time_mean",
            Self::LagMean => "lag_mean",
            Self::TimingCombo => "timing_combo",
            Self::StrongSpan => "strong_span",
            Self::StrongStart => "strong_start",
            Self::DominantSign => "dominant_sign",
            Self::NSelected => "n_selected",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown layer '{s}'"))
    }
}

/// Eight equally shaped `(n_lat, n_lon)` arrays, NaN where a gridpoint has
/// no summary.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    arrays: [Array2<f64>; 8],
}

impl LayerSet {
    /// NaN-filled layers of the given shape.
    pub fn new(n_lat: usize, n_lon: usize) -> Self {
        Self {
            arrays: std::array::from_fn(|_| Array2::from_elem((n_lat, n_lon), f64::NAN)),
        }
    }

    /// `(n_lat, n_lon)`.
    pub fn shape(&self) -> (usize, usize) {
        self.arrays[0].dim()
    }

    pub fn get(&self, kind: LayerKind) -> &Array2<f64> {
        &self.arrays[kind.index()]
    }

    /// Look a layer up by its string key.
    pub fn get_by_name(&self, name: &str) -> Option<&Array2<f64>> {
        name.parse::<LayerKind>().ok().map(|kind| self.get(kind))
    }

    /// Layers in [`LayerKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerKind, &Array2<f64>)> {
        LayerKind::ALL.into_iter().zip(self.arrays.iter())
    }

    /// `(key, array)` pairs, ready for the NetCDF writer.
    pub fn named(&self) -> Vec<(&'static str, &Array2<f64>)> {
        self.iter().map(|(kind, array)| (kind.as_str(), array)).collect()
    }

    /// Number of cells holding a summary.
    pub fn n_summarised(&self) -> usize {
        self.get(LayerKind::NSelected)
            .iter()
            .filter(|v| !v.is_nan())
            .count()
    }

    /// Writes all eight statistics into cell `(i, j)`.
    pub(crate) fn write(&mut self, i: usize, j: usize, summary: &GridpointSummary) {
        for (array, value) in self.arrays.iter_mut().zip(summary.values()) {
            array[[i, j]] = value;
        }
    }
}
