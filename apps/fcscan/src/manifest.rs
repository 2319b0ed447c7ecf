//! Job manifest — the serialisable record of one scan split.
//!
//! The manifest is what the submission layer reads: one entry per job, each with the
//! descriptor and the fitter arguments already rendered.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ScanError;
use crate::inputs::ScanInputs;
use crate::jobs::{JobDescriptor, SplitStrategy};
use crate::render::FitterCommand;
use crate::scan::{ScanOutcome, ScanWarning};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestJob {
    pub index: usize,
    pub descriptor: JobDescriptor,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobManifest {
    pub job_name: String,
    pub reference_id: String,
    pub created_at: DateTime<Utc>,
    pub x_param: String,
    pub y_param: String,
    pub strategy: SplitStrategy,
    pub lattice_shape: (usize, usize),
    /// Cells (or lattice points) the jobs were split from.
    pub regions: usize,
    pub inputs: ScanInputs,
    pub warnings: Vec<ScanWarning>,
    pub jobs: Vec<ManifestJob>,
}

impl JobManifest {
    /// Pairs each descriptor of `outcome` with its rendered fitter arguments.
    pub fn new(
        job_name: String,
        created_at: DateTime<Utc>,
        strategy: SplitStrategy,
        inputs: ScanInputs,
        command: &FitterCommand,
        outcome: ScanOutcome,
    ) -> Self {
        let reference_id = command.config_file.clone();
        let jobs = outcome
            .descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| ManifestJob {
                index,
                args: command.args(&descriptor),
                descriptor,
            })
            .collect();

        JobManifest {
            job_name,
            reference_id,
            created_at,
            x_param: command.x_param.clone(),
            y_param: command.y_param.clone(),
            strategy,
            lattice_shape: outcome.lattice_shape,
            regions: outcome.regions,
            inputs,
            warnings: outcome.warnings,
            jobs,
        }
    }
}

/// Writes the manifest as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_manifest(manifest: &JobManifest, path: Option<&Path>) -> Result<(), ScanError> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, manifest)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            info!(path = %path.display(), jobs = manifest.jobs.len(), "manifest written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, manifest)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Writes one space-joined fitter argument line per job.
pub fn write_arg_lines<W: Write>(manifest: &JobManifest, mut out: W) -> Result<(), ScanError> {
    for job in &manifest.jobs {
        writeln!(out, "{}", job.args.join(" "))?;
    }
    out.flush()?;
    Ok(())
}
