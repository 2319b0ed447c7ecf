use serde::{Deserialize, Serialize};

use crate::grid::AxisRange;

/// One independently dispatchable unit of work.
///
/// Descriptors share no state; a consumer may hand each one to a different worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Identifies the scan configuration, usually the config file name.
    pub reference_id: String,
    pub axis1: AxisRange,
    pub axis2: AxisRange,
    /// First dataset entry this job reads from.
    pub subset_offset: u64,
    /// Which statistical repeat of the full scan this job belongs to.
    pub layer_index: u32,
    /// Toys the fitter should generate for this job.
    pub repeats: u32,
}
