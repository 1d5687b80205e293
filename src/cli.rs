use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Scale-dependent correlation maps.
#[derive(Parser)]
#[command(
    name = "sdcmap",
    version,
    about = "Scale-dependent correlation maps between a climate index and a gridded field"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fetch inputs, compute the eight SDC layers and save them.
    Run(RunArgs),
    /// List the registered driver and field datasets.
    Datasets,
}

/// Arguments for the `run` subcommand.
///
/// Flags left unset fall back to the `[io]` section of the config file.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file. Defaults are used if the default
    /// file does not exist.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding downloaded datasets.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for the layer archive and run summary.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Driver dataset key (see `sdcmap datasets`).
    #[arg(long)]
    pub driver_dataset: Option<String>,

    /// Field dataset key (see `sdcmap datasets`).
    #[arg(long)]
    pub field_dataset: Option<String>,

    /// Never download; fail if a dataset is not cached.
    #[arg(long)]
    pub offline: bool,
}

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "sdcmap.toml";
