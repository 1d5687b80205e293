//! Gridded mapped field and the spatial window used to subset it.

use chrono::NaiveDate;
use ndarray::{Array3, s};
use sdcmap_calendar::ensure_increasing;

use crate::error::IoError;

// ---------------------------------------------------------------------------
// SpatialWindow
// ---------------------------------------------------------------------------

/// Latitude/longitude bounds (inclusive, degrees) plus subsampling strides.
///
/// Longitudes are compared after wrapping to `[-180, 180)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialWindow {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
    lat_stride: usize,
    lon_stride: usize,
}

impl Default for SpatialWindow {
    fn default() -> Self {
        Self {
            lat_min: -20.0,
            lat_max: 20.0,
            lon_min: -170.0,
            lon_max: -70.0,
            lat_stride: 1,
            lon_stride: 1,
        }
    }
}

impl SpatialWindow {
    /// Set the latitude bounds.
    pub fn with_lat_range(mut self, lat_min: f64, lat_max: f64) -> Self {
        self.lat_min = lat_min;
        self.lat_max = lat_max;
        self
    }

    /// Set the longitude bounds.
    pub fn with_lon_range(mut self, lon_min: f64, lon_max: f64) -> Self {
        self.lon_min = lon_min;
        self.lon_max = lon_max;
        self
    }

    /// Set the subsampling strides.
    pub fn with_strides(mut self, lat_stride: usize, lon_stride: usize) -> Self {
        self.lat_stride = lat_stride;
        self.lon_stride = lon_stride;
        self
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    pub fn lat_stride(&self) -> usize {
        self.lat_stride
    }

    pub fn lon_stride(&self) -> usize {
        self.lon_stride
    }

    /// Whether `lat` lies inside the latitude bounds.
    pub fn contains_lat(&self, lat: f64) -> bool {
        self.lat_min <= lat && lat <= self.lat_max
    }

    /// Whether `lon` (already wrapped) lies inside the longitude bounds.
    pub fn contains_lon(&self, lon: f64) -> bool {
        self.lon_min <= lon && lon <= self.lon_max
    }

    /// Validate that bounds are ordered and finite and strides are positive.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if !(self.lat_min.is_finite() && self.lat_max.is_finite()) || self.lat_min > self.lat_max
        {
            problems.push(format!(
                "lat range [{}, {}] is not an ordered finite interval",
                self.lat_min, self.lat_max
            ));
        }
        if !(self.lon_min.is_finite() && self.lon_max.is_finite()) || self.lon_min > self.lon_max
        {
            problems.push(format!(
                "lon range [{}, {}] is not an ordered finite interval",
                self.lon_min, self.lon_max
            ));
        }
        if self.lat_stride < 1 {
            problems.push("lat_stride must be >= 1".to_string());
        }
        if self.lon_stride < 1 {
            problems.push("lon_stride must be >= 1".to_string());
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

/// Wrap a longitude in degrees to `[-180, 180)`.
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

// ---------------------------------------------------------------------------
// MappedField
// ---------------------------------------------------------------------------

/// A `(time, lat, lon)` field on a strictly increasing time axis.
#[derive(Debug, Clone)]
pub struct MappedField {
    times: Vec<NaiveDate>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Array3<f64>,
}

impl MappedField {
    /// Create a field after validating the array shape against the axes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if any axis length disagrees
    /// with `values`, or [`IoError::Calendar`] if `times` is not strictly
    /// increasing.
    pub fn new(
        times: Vec<NaiveDate>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        values: Array3<f64>,
    ) -> Result<Self, IoError> {
        let (nt, ny, nx) = values.dim();
        for (name, expected, got) in [
            ("time", times.len(), nt),
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
        ensure_increasing(&times)?;
        Ok(Self {
            times,
            lats,
            lons,
            values,
        })
    }

    /// Time stamps.
    pub fn times(&self) -> &[NaiveDate] {
        &self.times
    }

    /// Latitude coordinates.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// The `(time, lat, lon)` array.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    pub fn n_time(&self) -> usize {
        self.times.len()
    }

    pub fn n_lat(&self) -> usize {
        self.lats.len()
    }

    pub fn n_lon(&self) -> usize {
        self.lons.len()
    }

    /// Copy of the time series at one gridpoint.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn series(&self, lat_idx: usize, lon_idx: usize) -> Vec<f64> {
        self.values.slice(s![.., lat_idx, lon_idx]).to_vec()
    }

    /// Latitude and longitude coordinate vectors.
    pub fn grid_coordinates(&self) -> (Vec<f64>, Vec<f64>) {
        (self.lats.clone(), self.lons.clone())
    }
}
