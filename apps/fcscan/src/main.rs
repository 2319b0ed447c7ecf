mod config;
mod errors;
mod grid;
mod inputs;
mod jobs;
mod manifest;
mod render;
mod scan;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::grid::AxisSpec;
use crate::inputs::{classify_inputs, reference_id_from_path};
use crate::jobs::{Replication, SplitStrategy, ToyBatching};
use crate::manifest::{write_arg_lines, write_manifest, JobManifest};
use crate::render::{job_label, FitterCommand};
use crate::scan::{run_scan, ScanConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Rectangular cells replicated over subsets and layers
    Cells,
    /// One job per lattice point per batch of toys
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full JSON manifest
    Manifest,
    /// One fitter argument line per job
    Args,
}

#[derive(Parser, Debug)]
#[command(name = "fcscan")]
#[command(about = "Split a two-parameter Feldman-Cousins scan into independent batch jobs")]
struct Args {
    /// Scan configuration XML, followed by data files, LFNs and the fitter library
    #[arg(required = true)]
    inputs: Vec<String>,

    #[arg(long, default_value = "Phi_s")]
    x_param: String,
    #[arg(long, default_value = "-2", allow_hyphen_values = true)]
    x_min: f64,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    x_max: f64,

    #[arg(long, default_value = "deltaGamma")]
    y_param: String,
    #[arg(long, default_value = "-0.1", allow_hyphen_values = true)]
    y_min: f64,
    #[arg(long, default_value = "0.2", allow_hyphen_values = true)]
    y_max: f64,

    /// Sample points per axis (both endpoints included)
    #[arg(long, default_value = "40")]
    points: u32,

    #[arg(long, value_enum, default_value = "cells")]
    strategy: StrategyArg,

    /// Lattice points per cell side
    #[arg(long, default_value = "1")]
    cell_side: usize,

    /// Distinct dataset subsets
    #[arg(long, default_value = "1")]
    subsets: u32,

    /// Dataset entries between consecutive subsets
    #[arg(long, default_value = "50000000")]
    subset_stride: u64,

    /// Independent repeats of the whole scan
    #[arg(long, default_value = "5")]
    layers: u32,

    /// Toys per cell job; defaults to FCSCAN_DEFAULT_REPEATS
    #[arg(long)]
    repeats: Option<u32>,

    /// Toys per lattice point (points strategy)
    #[arg(long, default_value = "200")]
    toys: u32,

    /// Toys per job (points strategy)
    #[arg(long, default_value = "20")]
    toys_per_job: u32,

    #[arg(long, value_enum, default_value = "manifest")]
    format: OutputFormat,

    /// Write output here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout is reserved for the manifest.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting fcscan v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let inputs = classify_inputs(&args.inputs);
    let Some(config_path) = inputs.config_file.clone() else {
        bail!("no scan configuration (*.xml) among the inputs");
    };
    let has_data = !inputs.lfns.is_empty()
        || inputs
            .files
            .iter()
            .any(|f| inputs.library.as_deref() != Some(f.as_str()));
    if !has_data {
        warn!("no data files or LFNs given; jobs will read the dataset named in the XML");
    }

    let reference_id = reference_id_from_path(&config_path);
    let scan_config = ScanConfig {
        axis1: AxisSpec::from_point_count(&args.x_param, args.x_min, args.x_max, args.points)?,
        axis2: AxisSpec::from_point_count(&args.y_param, args.y_min, args.y_max, args.points)?,
        strategy: build_strategy(&args, &config),
    };

    let outcome = match run_scan(&scan_config, &reference_id) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(code = e.code(), "scan split failed: {e}");
            return Err(e).context("failed to split scan into jobs");
        }
    };

    let command = FitterCommand {
        config_file: reference_id.clone(),
        x_param: args.x_param.clone(),
        y_param: args.y_param.clone(),
        dataset_entry_path: config.dataset_entry_path.clone(),
        extra_flags: config.fitter_flags.clone(),
    };
    let now = Utc::now();
    let manifest = JobManifest::new(
        job_label(&config.job_name, &reference_id, now),
        now,
        scan_config.strategy.clone(),
        inputs,
        &command,
        outcome,
    );
    info!(job_name = %manifest.job_name, jobs = manifest.jobs.len(), "manifest ready");

    match (args.format, args.output.as_deref()) {
        (OutputFormat::Manifest, path) => write_manifest(&manifest, path)?,
        (OutputFormat::Args, Some(path)) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_arg_lines(&manifest, io::BufWriter::new(file))?
        }
        (OutputFormat::Args, None) => write_arg_lines(&manifest, io::stdout().lock())?,
    }

    Ok(())
}

/// Maps the CLI strategy flags onto the split strategy; validation happens in the scan.
fn build_strategy(args: &Args, config: &Config) -> SplitStrategy {
    match args.strategy {
        StrategyArg::Cells => SplitStrategy::Cells {
            cell_side: args.cell_side,
            replication: Replication {
                subset_count: args.subsets,
                subset_stride: args.subset_stride,
                layer_count: args.layers,
            },
            repeats: args.repeats.unwrap_or(config.default_repeats),
        },
        StrategyArg::Points => SplitStrategy::Points(ToyBatching {
            toys_total: args.toys,
            toys_per_job: args.toys_per_job,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> Config {
        Config {
            rust_log: "info".to_string(),
            job_name: "FC_SCAN".to_string(),
            dataset_entry_path: "/RapidFit/ToFit/DataSet/StartingEntry".to_string(),
            default_repeats: 200,
            fitter_flags: vec![],
        }
    }

    #[test]
    fn test_defaults_match_driver_constants() {
        let args = Args::parse_from(["fcscan", "fc.xml"]);
        assert_eq!((args.x_min, args.x_max), (-2.0, 0.0));
        assert_eq!((args.y_min, args.y_max), (-0.1, 0.2));
        assert_eq!(args.points, 40);
        assert_eq!(args.strategy, StrategyArg::Cells);
        match build_strategy(&args, &make_config()) {
            SplitStrategy::Cells {
                cell_side,
                replication,
                repeats,
            } => {
                assert_eq!(cell_side, 1);
                assert_eq!(replication.layer_count, 5);
                assert_eq!(replication.subset_stride, 50_000_000);
                assert_eq!(repeats, 200);
            }
            other => panic!("expected cells strategy, got {other:?}"),
        }
    }

    #[test]
    fn test_points_strategy_flags() {
        let args = Args::parse_from([
            "fcscan",
            "FCXML.xml",
            "--strategy",
            "points",
            "--toys",
            "200",
            "--toys-per-job",
            "20",
            "--x-min",
            "-3.5",
        ]);
        assert_eq!(args.x_min, -3.5);
        assert_eq!(
            build_strategy(&args, &make_config()),
            SplitStrategy::Points(ToyBatching {
                toys_total: 200,
                toys_per_job: 20
            })
        );
    }

    #[test]
    fn test_repeats_flag_overrides_config() {
        let args = Args::parse_from(["fcscan", "fc.xml", "--repeats", "50"]);
        match build_strategy(&args, &make_config()) {
            SplitStrategy::Cells { repeats, .. } => assert_eq!(repeats, 50),
            other => panic!("expected cells strategy, got {other:?}"),
        }
    }

    #[test]
    fn test_inputs_required() {
        assert!(Args::try_parse_from(["fcscan"]).is_err());
    }
}
