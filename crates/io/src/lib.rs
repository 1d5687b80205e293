//! # sdcmap-io
//!
//! Bridges external file formats into the in-memory driver series and
//! mapped field: NOAA PSL text tables and CSV for driver indices, CF NetCDF
//! for gridded monthly fields, and NetCDF for the resulting layers. Also
//! holds the public dataset registry and a cache-or-download fetcher.

mod datasets;
mod driver;
mod error;
mod fetch;
mod field;
mod netcdf_read;
mod reader;
mod writer;

pub use datasets::{
    DEFAULT_DRIVER_DATASET, DEFAULT_FIELD_DATASET, DRIVER_DATASETS, DriverDataset, FIELD_DATASETS,
    FetchedPaths, FieldDataset, driver_dataset, fetch_datasets, field_dataset, load_driver,
    load_field,
};
pub use driver::{DriverFormat, DriverSeries, read_driver};
pub use error::IoError;
pub use fetch::fetch_if_missing;
pub use field::{MappedField, SpatialWindow, wrap_longitude};
pub use reader::{FieldReaderConfig, read_field_anomalies};
pub use writer::write_layers_netcdf;
