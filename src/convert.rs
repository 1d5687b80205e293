//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use sdcmap_calendar::{TimeWindow, parse_date};
use sdcmap_io::SpatialWindow;
use sdcmap_layers::SdcMapConfig;
use sdcmap_sdc::SdcParams;

use crate::config::{DomainToml, SdcMapToml, SdcToml};

/// Builds [`SdcParams`] from the TOML engine section.
pub fn build_sdc_params(sdc: &SdcToml) -> SdcParams {
    SdcParams::new(sdc.fragment_size)
        .with_n_permutations(sdc.n_permutations)
        .with_two_tailed(sdc.two_tailed)
        .with_lag_range(sdc.min_lag, sdc.max_lag)
        .with_seed(sdc.seed)
}

/// Builds the time window from the TOML domain section.
pub fn build_time_window(domain: &DomainToml) -> Result<TimeWindow> {
    TimeWindow::parse(&domain.time_start, &domain.time_end).with_context(|| {
        format!(
            "invalid [domain] time window: {} .. {}",
            domain.time_start, domain.time_end
        )
    })
}

/// Builds the spatial window from the TOML domain section.
pub fn build_spatial_window(domain: &DomainToml) -> SpatialWindow {
    SpatialWindow::default()
        .with_lat_range(domain.lat_min, domain.lat_max)
        .with_lon_range(domain.lon_min, domain.lon_max)
        .with_strides(domain.lat_stride, domain.lon_stride)
}

/// Builds and validates the full [`SdcMapConfig`].
pub fn build_sdcmap_config(toml: &SdcMapToml) -> Result<SdcMapConfig> {
    let peak_date = parse_date(&toml.selection.peak_date)
        .with_context(|| format!("invalid [selection] peak_date: {}", toml.selection.peak_date))?;
    let cfg = SdcMapConfig::default()
        .with_sdc(build_sdc_params(&toml.sdc))
        .with_alpha(toml.selection.alpha)
        .with_top_fraction(toml.selection.top_fraction)
        .with_peak_date(peak_date)
        .with_time_window(build_time_window(&toml.domain)?)
        .with_spatial(build_spatial_window(&toml.domain));
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}
