//! Registry of public driver and field datasets.

use std::path::{Path, PathBuf};

use sdcmap_calendar::TimeWindow;
use tracing::info;

use crate::driver::{DriverFormat, DriverSeries, read_driver};
use crate::error::IoError;
use crate::fetch::fetch_if_missing;
use crate::field::{MappedField, SpatialWindow};
use crate::reader::{FieldReaderConfig, read_field_anomalies};

/// A downloadable climate index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverDataset {
    /// Registry key, e.g. `"pdo"`.
    pub key: &'static str,
    pub url: &'static str,
    /// File name inside the data directory.
    pub file_name: &'static str,
    pub format: DriverFormat,
    /// Values at or below this are missing-data sentinels.
    pub missing_at_or_below: f64,
    pub description: &'static str,
}

/// A downloadable gridded monthly field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDataset {
    /// Registry key, e.g. `"ncep_air"`.
    pub key: &'static str,
    pub url: &'static str,
    /// File name inside the data directory.
    pub file_name: &'static str,
    /// NetCDF variable holding the field.
    pub variable: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_DRIVER_DATASET: &str = "pdo";
pub const DEFAULT_FIELD_DATASET: &str = "ncep_air";

pub const DRIVER_DATASETS: &[DriverDataset] = &[
    DriverDataset {
        key: "pdo",
        url: "https://psl.noaa.gov/data/correlation/pdo.data",
        file_name: "pdo.data",
        format: DriverFormat::PslTable,
        missing_at_or_below: -9.9,
        description: "Pacific Decadal Oscillation index (NOAA PSL)",
    },
    DriverDataset {
        key: "nao",
        url: "https://psl.noaa.gov/data/correlation/nao.data",
        file_name: "nao.data",
        format: DriverFormat::PslTable,
        missing_at_or_below: -99.9,
        description: "North Atlantic Oscillation index (NOAA PSL)",
    },
    DriverDataset {
        key: "nino34",
        url: "https://psl.noaa.gov/data/correlation/nina34.anom.csv",
        file_name: "nina34.anom.csv",
        format: DriverFormat::Csv,
        missing_at_or_below: -99.99,
        description: "Nino 3.4 SST anomaly index (NOAA PSL)",
    },
];

pub const FIELD_DATASETS: &[FieldDataset] = &[
    FieldDataset {
        key: "ncep_air",
        url: "https://downloads.psl.noaa.gov/Datasets/ncep.reanalysis.derived/surface/air.mon.mean.nc",
        file_name: "air.mon.mean.nc",
        variable: "air",
        description: "NCEP/NCAR reanalysis monthly surface air temperature",
    },
    FieldDataset {
        key: "ersstv5",
        url: "https://raw.githubusercontent.com/pydata/xarray-data/master/ersstv5.nc",
        file_name: "ersstv5.nc",
        variable: "sst",
        description: "NOAA ERSST v5 monthly sea surface temperature",
    },
];

/// Looks up a driver dataset by key.
///
/// # Errors
///
/// Returns [`IoError::UnknownDataset`] listing the known keys.
pub fn driver_dataset(key: &str) -> Result<&'static DriverDataset, IoError> {
    DRIVER_DATASETS
        .iter()
        .find(|d| d.key == key)
        .ok_or_else(|| IoError::UnknownDataset {
            kind: "driver",
            key: key.to_string(),
            available: DRIVER_DATASETS
                .iter()
                .map(|d| d.key)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Looks up a field dataset by key.
///
/// # Errors
///
/// Returns [`IoError::UnknownDataset`] listing the known keys.
pub fn field_dataset(key: &str) -> Result<&'static FieldDataset, IoError> {
    FIELD_DATASETS
        .iter()
        .find(|d| d.key == key)
        .ok_or_else(|| IoError::UnknownDataset {
            kind: "field",
            key: key.to_string(),
            available: FIELD_DATASETS
                .iter()
                .map(|d| d.key)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Local paths of a fetched driver/field pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPaths {
    pub driver: PathBuf,
    pub field: PathBuf,
}

/// Ensures both datasets are present in `data_dir`, downloading if needed.
///
/// Both keys are resolved before anything touches the network.
///
/// # Errors
///
/// Returns [`IoError::UnknownDataset`] for an unknown key, or any error
/// from [`fetch_if_missing`].
pub fn fetch_datasets(
    data_dir: &Path,
    driver_key: &str,
    field_key: &str,
    offline: bool,
) -> Result<FetchedPaths, IoError> {
    let driver = driver_dataset(driver_key)?;
    let field = field_dataset(field_key)?;

    let driver_path = fetch_if_missing(driver.url, &data_dir.join(driver.file_name), offline)?;
    let field_path = fetch_if_missing(field.url, &data_dir.join(field.file_name), offline)?;
    info!(driver = driver.key, field = field.key, "datasets ready");

    Ok(FetchedPaths {
        driver: driver_path,
        field: field_path,
    })
}

/// Reads a registered driver and restricts it to `window`.
///
/// # Errors
///
/// Returns [`IoError::UnknownDataset`] or any error from [`read_driver`].
pub fn load_driver(
    path: &Path,
    driver_key: &str,
    window: &TimeWindow,
) -> Result<DriverSeries, IoError> {
    let dataset = driver_dataset(driver_key)?;
    let series = read_driver(path, dataset.format, dataset.missing_at_or_below)?;
    Ok(series.window(window))
}

/// Reads a registered field as windowed monthly anomalies.
///
/// # Errors
///
/// Returns [`IoError::UnknownDataset`] or any error from
/// [`read_field_anomalies`].
pub fn load_field(
    path: &Path,
    field_key: &str,
    time_window: &TimeWindow,
    spatial: &SpatialWindow,
) -> Result<MappedField, IoError> {
    let dataset = field_dataset(field_key)?;
    let config = FieldReaderConfig::default().with_variable(dataset.variable);
    read_field_anomalies(path, &config, time_window, spatial)
}
