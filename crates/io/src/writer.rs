//! NetCDF writer for `(lat, lon)` result layers.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::info;

use crate::error::IoError;

/// Write named `(lat, lon)` layers plus their coordinates to a NetCDF file.
///
/// Each layer becomes an `f64` variable on the `("lat", "lon")` dimensions;
/// NaN marks gridpoints without a result. The parent directory is created
/// if needed and an existing file is overwritten.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if a layer's shape disagrees with
/// the coordinates, [`IoError::Validation`] on an empty or duplicated layer
/// name, [`IoError::Filesystem`] if the directory cannot be created, or
/// [`IoError::Netcdf`] on write failures.
pub fn write_layers_netcdf(
    path: &Path,
    layers: &[(&str, &Array2<f64>)],
    lats: &[f64],
    lons: &[f64],
) -> Result<PathBuf, IoError> {
    for (i, &(name, layer)) in layers.iter().enumerate() {
        if name.is_empty() || layers[..i].iter().any(|(other, _)| *other == name) {
            return Err(IoError::Validation {
                count: 1,
                details: format!("layer name '{name}' is empty or duplicated"),
            });
        }
        let (ny, nx) = layer.dim();
        if ny != lats.len() {
            return Err(IoError::DimensionMismatch {
                name: format!("{name} lat"),
                expected: lats.len(),
                got: ny,
            });
        }
        if nx != lons.len() {
            return Err(IoError::DimensionMismatch {
                name: format!("{name} lon"),
                expected: lons.len(),
                got: nx,
            });
        }
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::Filesystem {
            path: parent.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    let mut file = netcdf::create(path)?;
    file.add_dimension("lat", lats.len())?;
    file.add_dimension("lon", lons.len())?;

    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(lats, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(lons, ..)?;
    }

    for &(name, layer) in layers {
        let flat: Vec<f64> = layer.iter().copied().collect();
        let mut var = file.add_variable::<f64>(name, &["lat", "lon"])?;
        var.put_values(&flat, ..)?;
    }

    info!(
        path = %path.display(),
        n_layers = layers.len(),
        n_lat = lats.len(),
        n_lon = lons.len(),
        "wrote layer archive"
    );
    Ok(path.to_path_buf())
}
