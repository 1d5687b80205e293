//! High-level NetCDF field reader configuration and orchestration.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use ndarray::{Array3, Axis};
use sdcmap_calendar::{TimeWindow, month_start};
use sdcmap_stats::monthly_anomalies;
use tracing::{debug, info};

use crate::error::IoError;
use crate::field::{MappedField, SpatialWindow, wrap_longitude};
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// FieldReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a gridded monthly field from NetCDF.
///
/// The [`Default`] implementation reads the NCEP surface air temperature
/// variable `air` with CF coordinate names.
#[derive(Debug, Clone)]
pub struct FieldReaderConfig {
    /// NetCDF variable holding the `(time, lat, lon)` data.
    variable: String,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
}

impl Default for FieldReaderConfig {
    fn default() -> Self {
        Self {
            variable: "air".into(),
            time_var: "time".into(),
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
        }
    }
}

impl FieldReaderConfig {
    /// Set the data variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Replace the latitude aliases.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Replace the longitude aliases.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// Data variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Validate that no name is empty.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every empty name.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.variable.trim().is_empty() {
            problems.push("variable name is empty");
        }
        if self.time_var.trim().is_empty() {
            problems.push("time variable name is empty");
        }
        if self.lat_aliases.is_empty() {
            problems.push("no latitude aliases");
        }
        if self.lon_aliases.is_empty() {
            problems.push("no longitude aliases");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// read_field_anomalies
// ---------------------------------------------------------------------------

/// Read a monthly field, subset it, and convert it to monthly anomalies.
///
/// Steps, in order:
///
/// 1. Decode the CF time axis and normalise each stamp to its month start.
/// 2. Wrap longitudes to `[-180, 180)` and sort the grid by longitude.
/// 3. Keep time steps inside `time_window` and gridpoints inside `spatial`
///    (bounds inclusive; latitude keeps the file's order).
/// 4. Subtract each gridpoint's calendar-month mean over the subset.
/// 5. Subsample latitude and longitude by the configured strides.
///
/// # Errors
///
/// Returns [`IoError`] on missing variables, undecodable time axes, shape
/// mismatches, or when any axis ends up empty after subsetting.
pub fn read_field_anomalies(
    path: &Path,
    config: &FieldReaderConfig,
    time_window: &TimeWindow,
    spatial: &SpatialWindow,
) -> Result<MappedField, IoError> {
    config.validate()?;
    spatial.validate()?;

    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let lat_alias_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_alias_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();

    let lats = netcdf_read::read_1d_f64(&file, &lat_alias_refs, path)?;
    let lons = netcdf_read::read_1d_f64(&file, &lon_alias_refs, path)?;

    // -- Time ---------------------------------------------------------------

    let time_offsets = netcdf_read::read_1d_f64(&file, &[config.time_var.as_str()], path)?;
    let (unit, base_date) = netcdf_read::read_time_units(&file, &config.time_var, path)?;
    let raw_dates = netcdf_read::time_offsets_to_dates(base_date, unit, &time_offsets)?;
    let n_shifted = raw_dates.iter().filter(|d| d.day() != 1).count();
    if n_shifted > 0 {
        debug!(n_shifted, "normalised field time stamps to month start");
    }
    let dates: Vec<NaiveDate> = raw_dates.into_iter().map(month_start).collect();

    // -- 3-D data -----------------------------------------------------------

    let (data, [nt, ny, nx]) = netcdf_read::read_3d_f64(&file, &config.variable, path)?;
    for (name, expected, got) in [
        ("time", dates.len(), nt),
        ("lat", lats.len(), ny),
        ("lon", lons.len(), nx),
    ] {
        if expected != got {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got,
            });
        }
    }
    let full = Array3::from_shape_vec((nt, ny, nx), data).map_err(|e| IoError::Validation {
        count: 1,
        details: format!("data does not match shape ({nt}, {ny}, {nx}): {e}"),
    })?;

    // -- Subset ---------------------------------------------------------------

    let time_idx: Vec<usize> = (0..nt)
        .filter(|&t| time_window.contains(dates[t]))
        .collect();
    let lat_idx: Vec<usize> = (0..ny).filter(|&i| spatial.contains_lat(lats[i])).collect();

    let wrapped: Vec<f64> = lons.iter().map(|&lon| wrap_longitude(lon)).collect();
    let mut lon_order: Vec<usize> = (0..nx).collect();
    lon_order.sort_by(|&a, &b| wrapped[a].total_cmp(&wrapped[b]));
    let lon_idx: Vec<usize> = lon_order
        .into_iter()
        .filter(|&j| spatial.contains_lon(wrapped[j]))
        .collect();

    for (name, idx) in [("time", &time_idx), ("lat", &lat_idx), ("lon", &lon_idx)] {
        if idx.is_empty() {
            return Err(IoError::Validation {
                count: 1,
                details: format!("no {name} values of {} fall inside the window", path.display()),
            });
        }
    }

    let mut subset = full
        .select(Axis(0), &time_idx)
        .select(Axis(1), &lat_idx)
        .select(Axis(2), &lon_idx);
    let sub_dates: Vec<NaiveDate> = time_idx.iter().map(|&t| dates[t]).collect();

    // -- Anomalies ------------------------------------------------------------

    let months: Vec<u32> = sub_dates.iter().map(Datelike::month).collect();
    for mut column in subset.lanes_mut(Axis(0)) {
        let series = column.to_vec();
        let anomalies = monthly_anomalies(&series, &months);
        column.iter_mut().zip(anomalies).for_each(|(v, a)| *v = a);
    }

    // -- Stride ---------------------------------------------------------------

    let lat_keep: Vec<usize> = (0..lat_idx.len()).step_by(spatial.lat_stride()).collect();
    let lon_keep: Vec<usize> = (0..lon_idx.len()).step_by(spatial.lon_stride()).collect();
    let values = subset
        .select(Axis(1), &lat_keep)
        .select(Axis(2), &lon_keep);
    let out_lats: Vec<f64> = lat_keep.iter().map(|&k| lats[lat_idx[k]]).collect();
    let out_lons: Vec<f64> = lon_keep.iter().map(|&k| wrapped[lon_idx[k]]).collect();

    info!(
        path = %path.display(),
        variable = config.variable(),
        n_time = sub_dates.len(),
        n_lat = out_lats.len(),
        n_lon = out_lons.len(),
        "loaded field anomalies"
    );

    MappedField::new(sub_dates, out_lats, out_lons, values)
}
