//! Fitter argument rendering — the string form each descriptor takes on the worker.
//!
//! Only builds argument vectors; launching the fitter is the submission layer's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::AxisRange;
use crate::jobs::JobDescriptor;

/// Fixed part of the fitter invocation shared by every job in a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitterCommand {
    /// Scan configuration file name as seen on the worker.
    pub config_file: String,
    pub x_param: String,
    pub y_param: String,
    /// XML path overridden with the job's subset offset.
    pub dataset_entry_path: String,
    /// Extra flags inserted after `--doFCscan`, e.g. `--debugFC`.
    pub extra_flags: Vec<String>,
}

impl FitterCommand {
    /// Argument list for one job, in the order the fitter expects.
    pub fn args(&self, job: &JobDescriptor) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.config_file.clone(),
            "--doFCscan".to_string(),
        ];
        args.extend(self.extra_flags.iter().cloned());
        args.extend([
            "--defineContour".to_string(),
            contour_arg(&self.x_param, &job.axis1),
            contour_arg(&self.y_param, &job.axis2),
            "-repeats".to_string(),
            job.repeats.to_string(),
            "--OverrideXML".to_string(),
            self.dataset_entry_path.clone(),
            job.subset_offset.to_string(),
        ]);
        args
    }
}

/// `name,low,high,count`
pub fn contour_arg(name: &str, range: &AxisRange) -> String {
    format!(
        "{name},{},{},{}",
        format_value(range.low),
        format_value(range.high),
        range.count
    )
}

/// Shortest round-trip form, keeping a trailing `.0` on integral values.
pub fn format_value(value: f64) -> String {
    format!("{value:?}")
}

/// `{prefix}_{reference}_{YYYY-MM-DD_HH.MM}`, used to name the submitted job group.
pub fn job_label(prefix: &str, reference: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}_{reference}_{}", at.format("%Y-%m-%d_%H.%M"))
}
