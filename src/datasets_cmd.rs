//! Datasets command: list the dataset registry.

use anyhow::Result;

use sdcmap_io::{DEFAULT_DRIVER_DATASET, DEFAULT_FIELD_DATASET, DRIVER_DATASETS, FIELD_DATASETS};

/// Print every registered driver and field dataset.
pub fn run() -> Result<()> {
    print!("{}", render());
    Ok(())
}

fn render() -> String {
    let mut out = String::from("Driver datasets:\n");
    for d in DRIVER_DATASETS {
        out.push_str(&line(d.key, d.key == DEFAULT_DRIVER_DATASET, d.description));
    }
    out.push_str("Field datasets:\n");
    for f in FIELD_DATASETS {
        out.push_str(&line(f.key, f.key == DEFAULT_FIELD_DATASET, f.description));
    }
    out
}

fn line(key: &str, is_default: bool, description: &str) -> String {
    let marker = if is_default { " (default)" } else { "" };
    format!("  {:<20}{description}\n", format!("{key}{marker}"))
}
