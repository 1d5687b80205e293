//! # sdcmap-calendar
//!
//! Monthly date arithmetic shared by the driver index and the mapped field.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["&str"] -->|"parse_date()"| B["NaiveDate"]
//!     B -->|"month_start()"| B
//!     B -->|"month_sequence()"| C["Vec of NaiveDate"]
//!     C -->|"align_to()"| D["values on target calendar"]
//!     C -->|"nearest_index()"| E["peak reference index"]
//!     F["TimeWindow"] -->|".contains()"| B
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sdcmap_calendar::{align_to, month_sequence, nearest_index, parse_date};
//!
//! let start = parse_date("2000-01-01").unwrap();
//! let calendar = month_sequence(start, 24);
//!
//! // Peak reference: closest month boundary, earliest wins on ties.
//! let peak = parse_date("2000-06-15").unwrap();
//! assert_eq!(nearest_index(&calendar, peak).unwrap(), 5);
//!
//! // Reindex a driver onto the calendar; gaps are an error.
//! let values: Vec<f64> = (0..24).map(f64::from).collect();
//! let aligned = align_to(&calendar, &values, &calendar).unwrap();
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `month` | Date parsing, month boundaries, monthly sequences |
//! | `window` | Inclusive time window |
//! | `align` | Reindexing onto a target calendar, nearest-index lookup |
//! | `error` | Error types |

mod align;
mod error;
mod month;
mod window;

pub use align::{align_to, ensure_increasing, nearest_index};
pub use error::CalendarError;
pub use month::{month_sequence, month_start, parse_date};
pub use window::TimeWindow;
