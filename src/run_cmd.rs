//! Run command: fetch inputs, compute the SDC layers, write outputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use sdcmap_io::{fetch_datasets, load_driver, load_field, write_layers_netcdf};
use sdcmap_layers::{RunSummary, compute_layers, to_json};
use sdcmap_sdc::PermutationEngine;

use crate::cli::{DEFAULT_CONFIG, RunArgs};
use crate::config::{IoToml, SdcMapToml};
use crate::convert;

const LAYERS_FILE: &str = "sdcmap_layers.nc";
const SUMMARY_FILE: &str = "sdcmap_layers.summary.json";

/// I/O settings after applying command-line overrides.
#[derive(Debug, PartialEq)]
struct RunIo {
    data_dir: PathBuf,
    out_dir: PathBuf,
    driver_dataset: String,
    field_dataset: String,
    offline: bool,
}

fn resolve_io(args: RunArgs, io: IoToml) -> RunIo {
    RunIo {
        data_dir: args.data_dir.unwrap_or(io.data_dir),
        out_dir: args.out_dir.unwrap_or(io.out_dir),
        driver_dataset: args.driver_dataset.unwrap_or(io.driver_dataset),
        field_dataset: args.field_dataset.unwrap_or(io.field_dataset),
        offline: args.offline || io.offline,
    }
}

/// Run the full SDC map pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();

    // 1. Load project TOML
    let (config_path, required) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG), false),
    };
    let toml = SdcMapToml::load(&config_path, required)?;
    let config = convert::build_sdcmap_config(&toml)?;
    if let Some(threads) = toml.run.threads {
        configure_threads(threads)?;
    }
    let io = resolve_io(args, toml.io);

    // 2. Fetch inputs
    let paths = fetch_datasets(
        &io.data_dir,
        &io.driver_dataset,
        &io.field_dataset,
        io.offline,
    )
    .context("failed to fetch input datasets")?;

    // 3. Load driver and field
    let driver = load_driver(&paths.driver, &io.driver_dataset, config.time_window())
        .with_context(|| format!("failed to load driver: {}", paths.driver.display()))?;
    let field = load_field(
        &paths.field,
        &io.field_dataset,
        config.time_window(),
        config.spatial(),
    )
    .with_context(|| format!("failed to load field: {}", paths.field.display()))?;
    info!(
        driver_len = driver.len(),
        n_time = field.n_time(),
        n_lat = field.n_lat(),
        n_lon = field.n_lon(),
        "inputs loaded"
    );

    // 4. Compute layers
    let result = compute_layers(&driver, &field, &config, &PermutationEngine)
        .context("failed to compute SDC layers")?;

    // 5. Write outputs
    let layers_path = write_layers_netcdf(
        &io.out_dir.join(LAYERS_FILE),
        &result.layers().named(),
        result.lats(),
        result.lons(),
    )
    .context("failed to write layer archive")?;

    let summary = RunSummary::new(
        &io.driver_dataset,
        &io.field_dataset,
        &config,
        field.n_time(),
        &result,
    );
    let summary_path = io.out_dir.join(SUMMARY_FILE);
    write_summary(&summary_path, &summary)?;

    println!("Saved layers: {}", layers_path.display());
    println!("Saved summary: {}", summary_path.display());
    println!("Driver dataset: {}", io.driver_dataset);
    println!("Field dataset: {}", io.field_dataset);
    Ok(())
}

fn configure_threads(threads: usize) -> Result<()> {
    if threads == 0 {
        bail!("[run] threads must be >= 1");
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("failed to configure rayon thread pool")?;
    info!(threads, "rayon pool configured");
    Ok(())
}

fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = to_json(summary).context("failed to serialize run summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write run summary: {}", path.display()))?;
    info!(path = %path.display(), "run summary written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            config: None,
            data_dir: None,
            out_dir: None,
            driver_dataset: None,
            field_dataset: None,
            offline: false,
        }
    }

    #[test]
    fn toml_io_used_without_flags() {
        let io = resolve_io(args(), IoToml::default());
        assert_eq!(io.data_dir, PathBuf::from(".data"));
        assert_eq!(io.out_dir, PathBuf::from(".output"));
        assert_eq!(io.driver_dataset, "pdo");
        assert_eq!(io.field_dataset, "ncep_air");
        assert!(!io.offline);
    }

    #[test]
    fn flags_override_toml() {
        let mut a = args();
        a.driver_dataset = Some("nao".to_string());
        a.out_dir = Some(PathBuf::from("maps"));
        a.offline = true;
        let io = resolve_io(a, IoToml::default());
        assert_eq!(io.driver_dataset, "nao");
        assert_eq!(io.out_dir, PathBuf::from("maps"));
        assert_eq!(io.field_dataset, "ncep_air");
        assert!(io.offline);
    }

    #[test]
    fn offline_in_toml_is_kept() {
        let toml: SdcMapToml = toml::from_str("[io]\noffline = true\n").unwrap();
        assert!(resolve_io(args(), toml.io).offline);
    }

    #[test]
    fn zero_threads_rejected() {
        assert!(configure_threads(0).is_err());
    }
}
