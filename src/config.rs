use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Top-level sdcmap configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdcMapToml {
    /// Correlation engine settings.
    #[serde(default)]
    pub sdc: SdcToml,

    /// Significance and selection settings.
    #[serde(default)]
    pub selection: SelectionToml,

    /// Time and spatial domain.
    #[serde(default)]
    pub domain: DomainToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Runtime settings.
    #[serde(default)]
    pub run: RunToml,
}

impl SdcMapToml {
    /// Loads the configuration at `path`.
    ///
    /// When `path` does not exist and `required` is false, the built-in
    /// defaults are returned.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdcToml {
    #[serde(default = "default_fragment_size")]
    pub fragment_size: usize,
    #[serde(default = "default_n_permutations")]
    pub n_permutations: usize,
    #[serde(default)]
    pub two_tailed: bool,
    #[serde(default = "default_min_lag")]
    pub min_lag: i64,
    #[serde(default = "default_max_lag")]
    pub max_lag: i64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SdcToml {
    fn default() -> Self {
        Self {
            fragment_size: default_fragment_size(),
            n_permutations: default_n_permutations(),
            two_tailed: false,
            min_lag: default_min_lag(),
            max_lag: default_max_lag(),
            seed: default_seed(),
        }
    }
}

fn default_fragment_size() -> usize {
    12
}
fn default_n_permutations() -> usize {
    49
}
fn default_min_lag() -> i64 {
    -6
}
fn default_max_lag() -> i64 {
    6
}
fn default_seed() -> u64 {
    42
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionToml {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_top_fraction")]
    pub top_fraction: f64,
    /// `YYYY-MM-DD` or `YYYY-MM`.
    #[serde(default = "default_peak_date")]
    pub peak_date: String,
}

impl Default for SelectionToml {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            top_fraction: default_top_fraction(),
            peak_date: default_peak_date(),
        }
    }
}

fn default_alpha() -> f64 {
    0.05
}
fn default_top_fraction() -> f64 {
    0.25
}
fn default_peak_date() -> String {
    "2015-11-01".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainToml {
    #[serde(default = "default_time_start")]
    pub time_start: String,
    #[serde(default = "default_time_end")]
    pub time_end: String,
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,
    #[serde(default = "default_lat_max")]
    pub lat_max: f64,
    #[serde(default = "default_lon_min")]
    pub lon_min: f64,
    #[serde(default = "default_lon_max")]
    pub lon_max: f64,
    #[serde(default = "default_stride")]
    pub lat_stride: usize,
    #[serde(default = "default_stride")]
    pub lon_stride: usize,
}

impl Default for DomainToml {
    fn default() -> Self {
        Self {
            time_start: default_time_start(),
            time_end: default_time_end(),
            lat_min: default_lat_min(),
            lat_max: default_lat_max(),
            lon_min: default_lon_min(),
            lon_max: default_lon_max(),
            lat_stride: default_stride(),
            lon_stride: default_stride(),
        }
    }
}

fn default_time_start() -> String {
    "2014-01-01".to_string()
}
fn default_time_end() -> String {
    "2018-12-01".to_string()
}
fn default_lat_min() -> f64 {
    -20.0
}
fn default_lat_max() -> f64 {
    20.0
}
fn default_lon_min() -> f64 {
    -170.0
}
fn default_lon_max() -> f64 {
    -70.0
}
fn default_stride() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "default_driver_dataset")]
    pub driver_dataset: String,
    #[serde(default = "default_field_dataset")]
    pub field_dataset: String,
    #[serde(default)]
    pub offline: bool,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            out_dir: default_out_dir(),
            driver_dataset: default_driver_dataset(),
            field_dataset: default_field_dataset(),
            offline: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".data")
}
fn default_out_dir() -> PathBuf {
    PathBuf::from(".output")
}
fn default_driver_dataset() -> String {
    sdcmap_io::DEFAULT_DRIVER_DATASET.to_string()
}
fn default_field_dataset() -> String {
    sdcmap_io::DEFAULT_FIELD_DATASET.to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    /// Worker threads for the gridpoint scan; rayon's default when unset.
    #[serde(default)]
    pub threads: Option<usize>,
}
