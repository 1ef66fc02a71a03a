//! Drainage density and flow-direction preparation tools.
//!
//! Converts grid files to GeoTIFF, merges and resamples drainage density,
//! and masks D8 flow direction against density coverage.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hydro_tools::commands;
use hydro_tools::ToolsConfig;

#[derive(Parser, Debug)]
#[command(name = "hydro-tools")]
#[command(about = "Drainage density and flow-direction grid tools")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export one grid-file variable as a GeoTIFF
    ToGeotiff {
        h5file: PathBuf,
        geotiff: PathBuf,

        /// Variable to export (default: the only non-coordinate variable)
        #[arg(short, long)]
        var: Option<String>,

        /// Crop to the rows and columns holding finite values
        #[arg(short, long)]
        shrink: bool,
    },

    /// Merge modeled and surveyed drainage density
    MergeDensity {
        modeled: PathBuf,
        surveyed: PathBuf,
        survey_mask: PathBuf,
        output: PathBuf,
    },

    /// Resample a density raster onto the grid of another raster
    ReprojectDensity {
        srcraster: PathBuf,
        desgrid: PathBuf,
        desraster: PathBuf,
    },

    /// Write a zero-filled GeoTIFF on a grid file's coordinates
    EmptyRaster { desraster: PathBuf, grid: PathBuf },

    /// Clear flow directions and upstream area outside density coverage
    MaskFlowDirection { d8_file: PathBuf, den_file: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    gridfile::silence_hdf5_errors();

    let config = ToolsConfig::from_env();
    config.validate().map_err(|e| anyhow!("Invalid configuration: {e}"))?;
    info!(config = %serde_json::to_string(&config)?, "Loaded configuration");

    match args.command {
        Command::ToGeotiff {
            h5file,
            geotiff,
            var,
            shrink,
        } => commands::to_geotiff::run(&h5file, &geotiff, var.as_deref(), shrink, &config),
        Command::MergeDensity {
            modeled,
            surveyed,
            survey_mask,
            output,
        } => commands::merge_density::run(&modeled, &surveyed, &survey_mask, &output, &config),
        Command::ReprojectDensity {
            srcraster,
            desgrid,
            desraster,
        } => commands::reproject_density::run(&srcraster, &desgrid, &desraster, &config),
        Command::EmptyRaster { desraster, grid } => {
            commands::empty_raster::run(&desraster, &grid, &config)
        }
        Command::MaskFlowDirection { d8_file, den_file } => {
            commands::mask_flow_direction::run(&d8_file, &den_file)
        }
    }
}
