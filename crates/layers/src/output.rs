//! JSON run summary written next to the layer archive.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate::SdcMapLayers;
use crate::config::SdcMapConfig;
use crate::error::LayerError;

/// Top-level run summary.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub driver_dataset: String,
    pub field_dataset: String,
    /// Echo of the configuration used.
    pub config: ConfigSummary,
    pub grid: GridSummary,
    /// layer key -> statistics over its finite cells
    pub layers: BTreeMap<String, LayerStats>,
}

/// Flattened configuration echo.
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub fragment_size: usize,
    pub n_permutations: usize,
    pub two_tailed: bool,
    pub min_lag: i64,
    pub max_lag: i64,
    pub seed: u64,
    pub alpha: f64,
    pub top_fraction: f64,
    pub peak_date: String,
    pub time_start: String,
    pub time_end: String,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_stride: usize,
    pub lon_stride: usize,
}

/// Grid shape and coverage.
#[derive(Debug, Serialize)]
pub struct GridSummary {
    pub n_time: usize,
    pub n_lat: usize,
    pub n_lon: usize,
    pub n_cells: usize,
    /// Cells holding a summary.
    pub n_summarised: usize,
}

/// Finite-cell statistics of one layer; `None` when every cell is NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerStats {
    pub n_finite: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl LayerStats {
    fn from_values<'a>(values: impl Iterator<Item = &'a f64>) -> Self {
        let finite: Vec<f64> = values.copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self {
                n_finite: 0,
                min: None,
                max: None,
                mean: None,
            };
        }
        Self {
            n_finite: finite.len(),
            min: finite.iter().copied().reduce(f64::min),
            max: finite.iter().copied().reduce(f64::max),
            mean: Some(sdcmap_stats::mean(&finite)),
        }
    }
}

impl RunSummary {
    /// Builds the summary of a finished run.
    pub fn new(
        driver_dataset: &str,
        field_dataset: &str,
        config: &SdcMapConfig,
        n_time: usize,
        result: &SdcMapLayers,
    ) -> Self {
        let sdc = config.sdc();
        let spatial = config.spatial();
        let (n_lat, n_lon) = result.layers().shape();

        let layers = result
            .layers()
            .iter()
            .map(|(kind, array)| {
                (
                    kind.as_str().to_string(),
                    LayerStats::from_values(array.iter()),
                )
            })
            .collect();

        Self {
            driver_dataset: driver_dataset.to_string(),
            field_dataset: field_dataset.to_string(),
            config: ConfigSummary {
                fragment_size: sdc.fragment_size(),
                n_permutations: sdc.n_permutations(),
                two_tailed: sdc.two_tailed(),
                min_lag: sdc.min_lag(),
                max_lag: sdc.max_lag(),
                seed: sdc.seed(),
                alpha: config.alpha(),
                top_fraction: config.top_fraction(),
                peak_date: config.peak_date().to_string(),
                time_start: config.time_window().start().to_string(),
                time_end: config.time_window().end().to_string(),
                lat_min: spatial.lat_min(),
                lat_max: spatial.lat_max(),
                lon_min: spatial.lon_min(),
                lon_max: spatial.lon_max(),
                lat_stride: spatial.lat_stride(),
                lon_stride: spatial.lon_stride(),
            },
            grid: GridSummary {
                n_time,
                n_lat,
                n_lon,
                n_cells: n_lat * n_lon,
                n_summarised: result.layers().n_summarised(),
            },
            layers,
        }
    }
}

/// Serialize a run summary to a pretty JSON string.
pub fn to_json(summary: &RunSummary) -> Result<String, LayerError> {
    serde_json::to_string_pretty(summary).map_err(|e| LayerError::Serialization {
        reason: e.to_string(),
    })
}
