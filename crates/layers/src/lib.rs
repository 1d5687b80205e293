//! # sdcmap-layers
//!
//! Maps where and when a gridded field is strongly correlated with a driver
//! index. For every gridpoint the local series is checked for degeneracy,
//! handed to a [`CorrelationEngine`](sdcmap_sdc::CorrelationEngine), filtered
//! for significance, reduced to its most extreme rows of one sign, and
//! summarised into eight statistics.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph TD
//!     A["DriverSeries + MappedField"] -->|"align_driver()"| B["aligned driver"]
//!     B -->|"resolve_peak_index()"| C["peak index"]
//!     B --> D["per gridpoint (rayon)"]
//!     D -->|"check_gridpoint()"| E["engine.evaluate()"]
//!     E -->|"significant_rows()"| F["select_top_extremes()"]
//!     F -->|"GridpointSummary::from_selection()"| G["LayerSet"]
//!     G --> H["SdcMapLayers"]
//!     H -->|"RunSummary::new()"| I["JSON"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sdcmap_layers::{LayerKind, SdcMapConfig, compute_layers};
//! use sdcmap_sdc::PermutationEngine;
//!
//! let config = SdcMapConfig::default();
//! let result = compute_layers(&driver, &field, &config, &PermutationEngine)?;
//! let corr = result.layers().get(LayerKind::CorrMean);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Immutable run configuration |
//! | `validity` | Gridpoint validity filter |
//! | `significance` | p-value filter over engine rows |
//! | `select` | Top-extreme selection and dominant sign |
//! | `summary` | Eight-statistic gridpoint summary |
//! | `layer` | Layer keys and the NaN-filled layer set |
//! | `aggregate` | Alignment, peak resolution, parallel grid scan |
//! | `output` | JSON run summary |
//! | `error` | Error types |

mod aggregate;
mod config;
mod error;
mod layer;
mod output;
mod select;
mod significance;
mod summary;
mod validity;

pub use aggregate::{
    SdcMapLayers, align_driver, compute_layers, evaluate_gridpoint, resolve_peak_index,
};
pub use config::SdcMapConfig;
pub use error::LayerError;
pub use layer::{LayerKind, LayerSet};
pub use output::{ConfigSummary, GridSummary, LayerStats, RunSummary, to_json};
pub use select::{Selection, SignGroup, select_top_extremes};
pub use significance::significant_rows;
pub use summary::GridpointSummary;
pub use validity::{SkipReason, check_gridpoint};
