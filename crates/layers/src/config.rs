//! The immutable run configuration.

use chrono::NaiveDate;
use sdcmap_calendar::TimeWindow;
use sdcmap_io::SpatialWindow;
use sdcmap_sdc::SdcParams;

use crate::error::LayerError;

/// Every parameter of one SDC map run.
///
/// Built once with the `with_*` methods and read through accessors; the
/// scan never mutates it.
///
/// # Example
///
/// ```
/// use sdcmap_layers::SdcMapConfig;
/// use sdcmap_sdc::SdcParams;
///
/// let config = SdcMapConfig::default()
///     .with_sdc(SdcParams::new(6).with_lag_range(-3, 3))
///     .with_alpha(0.01)
///     .with_top_fraction(0.5);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SdcMapConfig {
    /// Correlation engine parameters.
    sdc: SdcParams,
    /// Significance threshold on p-values (inclusive).
    alpha: f64,
    /// Share of each sign group kept as extremes.
    top_fraction: f64,
    /// Reference timestamp for peak-relative offsets.
    peak_date: NaiveDate,
    /// Time window for both the driver and the field.
    time_window: TimeWindow,
    /// Spatial subset and strides of the field.
    spatial: SpatialWindow,
}

impl Default for SdcMapConfig {
    fn default() -> Self {
        Self {
            sdc: SdcParams::default(),
            alpha: 0.05,
            top_fraction: 0.25,
            peak_date: NaiveDate::from_ymd_opt(2015, 11, 1).unwrap_or_default(),
            time_window: TimeWindow::default(),
            spatial: SpatialWindow::default(),
        }
    }
}

impl SdcMapConfig {
    /// Set the engine parameters.
    pub fn with_sdc(mut self, sdc: SdcParams) -> Self {
        self.sdc = sdc;
        self
    }

    /// Set the significance threshold.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the top selection fraction.
    pub fn with_top_fraction(mut self, top_fraction: f64) -> Self {
        self.top_fraction = top_fraction;
        self
    }

    /// Set the peak reference date.
    pub fn with_peak_date(mut self, peak_date: NaiveDate) -> Self {
        self.peak_date = peak_date;
        self
    }

    /// Set the time window.
    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }

    /// Set the spatial window.
    pub fn with_spatial(mut self, spatial: SpatialWindow) -> Self {
        self.spatial = spatial;
        self
    }

    pub fn sdc(&self) -> &SdcParams {
        &self.sdc
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn top_fraction(&self) -> f64 {
        self.top_fraction
    }

    pub fn peak_date(&self) -> NaiveDate {
        self.peak_date
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn spatial(&self) -> &SpatialWindow {
        &self.spatial
    }

    /// Validate every parameter, collecting all problems.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::Validation`] listing each failed check.
    pub fn validate(&self) -> Result<(), LayerError> {
        let mut problems = Vec::new();

        if let Err(e) = self.sdc.validate() {
            problems.push(e.to_string());
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            problems.push(format!("alpha must be in (0, 1], got {}", self.alpha));
        }
        if !(self.top_fraction > 0.0 && self.top_fraction <= 1.0) {
            problems.push(format!(
                "top_fraction must be in (0, 1], got {}",
                self.top_fraction
            ));
        }
        if let Err(e) = self.spatial.validate() {
            problems.push(e.to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(LayerError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}
