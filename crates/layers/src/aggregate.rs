//! Grid scan: alignment, peak resolution, and per-gridpoint evaluation.

use chrono::NaiveDate;
use rayon::prelude::*;
use sdcmap_calendar::{align_to, nearest_index};
use sdcmap_io::{DriverSeries, MappedField};
use sdcmap_sdc::CorrelationEngine;
use tracing::{debug, info, trace};

use crate::config::SdcMapConfig;
use crate::error::LayerError;
use crate::layer::LayerSet;
use crate::select::select_top_extremes;
use crate::significance::significant_rows;
use crate::summary::GridpointSummary;
use crate::validity::check_gridpoint;

/// Result of a full scan: the eight layers and their coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SdcMapLayers {
    layers: LayerSet,
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl SdcMapLayers {
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }
}

/// Reindexes the driver onto the field's time stamps.
///
/// # Errors
///
/// Returns [`LayerError::Alignment`] if any field time stamp has no finite
/// driver value.
pub fn align_driver(driver: &DriverSeries, field: &MappedField) -> Result<Vec<f64>, LayerError> {
    Ok(align_to(driver.dates(), driver.values(), field.times())?)
}

/// Position in `calendar` closest to `peak`; the earliest wins on ties.
///
/// # Errors
///
/// Returns [`LayerError::Alignment`] if the calendar is empty.
pub fn resolve_peak_index(calendar: &[NaiveDate], peak: NaiveDate) -> Result<usize, LayerError> {
    Ok(nearest_index(calendar, peak)?)
}

/// Runs validity, engine, significance, selection and summary for one
/// gridpoint. `Ok(None)` is the normal "no result" outcome.
///
/// # Errors
///
/// Returns [`LayerError::Engine`] only if the engine itself fails.
pub fn evaluate_gridpoint<E: CorrelationEngine + ?Sized>(
    driver: &[f64],
    local: &[f64],
    peak_index: usize,
    config: &SdcMapConfig,
    engine: &E,
) -> Result<Option<GridpointSummary>, LayerError> {
    if let Err(reason) = check_gridpoint(local, driver, config.sdc().fragment_size()) {
        trace!(?reason, "gridpoint skipped");
        return Ok(None);
    }

    let rows = engine.evaluate(driver, local, config.sdc())?;
    let significant = significant_rows(&rows, config.alpha());
    if significant.is_empty() {
        trace!(n_rows = rows.len(), "no significant rows");
        return Ok(None);
    }

    let Some(selection) = select_top_extremes(&significant, peak_index, config.top_fraction())
    else {
        trace!(n_significant = significant.len(), "no qualifying sign group");
        return Ok(None);
    };
    Ok(GridpointSummary::from_selection(&selection))
}

/// Computes the eight SDC map layers for every gridpoint of `field`.
///
/// Alignment and peak resolution happen once, before any gridpoint is
/// evaluated; if either fails nothing is computed. Gridpoints are evaluated
/// in parallel and written back by this function alone, one cell each.
///
/// # Errors
///
/// Returns [`LayerError::Validation`] for an invalid configuration,
/// [`LayerError::Alignment`] if the driver does not cover the field
/// calendar, or [`LayerError::Engine`] if the engine fails.
pub fn compute_layers<E: CorrelationEngine + ?Sized>(
    driver: &DriverSeries,
    field: &MappedField,
    config: &SdcMapConfig,
    engine: &E,
) -> Result<SdcMapLayers, LayerError> {
    config.validate()?;

    let aligned = align_driver(driver, field)?;
    let peak_index = resolve_peak_index(field.times(), config.peak_date())?;
    debug!(
        n_time = aligned.len(),
        peak_index,
        peak_date = %field.times()[peak_index],
        "driver aligned to field calendar"
    );

    let (n_lat, n_lon) = (field.n_lat(), field.n_lon());
    info!(n_lat, n_lon, n_cells = n_lat * n_lon, "scanning gridpoints");

    let summaries: Vec<Option<GridpointSummary>> = (0..n_lat * n_lon)
        .into_par_iter()
        .map(|cell| {
            let local = field.series(cell / n_lon, cell % n_lon);
            evaluate_gridpoint(&aligned, &local, peak_index, config, engine)
        })
        .collect::<Result<_, _>>()?;

    let mut layers = LayerSet::new(n_lat, n_lon);
    for (cell, summary) in summaries.iter().enumerate() {
        if let Some(summary) = summary {
            layers.write(cell / n_lon, cell % n_lon, summary);
        }
    }

    info!(
        n_summarised = layers.n_summarised(),
        n_cells = n_lat * n_lon,
        "layers computed"
    );

    let (lats, lons) = field.grid_coordinates();
    Ok(SdcMapLayers { layers, lats, lons })
}
