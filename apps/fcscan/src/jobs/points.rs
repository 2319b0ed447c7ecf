//! Single-point batching — one job per lattice point per group of toys.
//!
//! Each point is fitted on its own (`low == high`, count 1). The toy total for a point
//! is cut into `ceil(toys_total / toys_per_job)` groups of exactly `toys_per_job` toys,
//! so a total that is not a multiple of the group size is rounded up.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ScanError;
use crate::grid::{AxisRange, Lattice};
use crate::jobs::descriptor::JobDescriptor;
use crate::jobs::expander::checked_job_count;

/// Toy budget per lattice point and how it is split into jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToyBatching {
    pub toys_total: u32,
    pub toys_per_job: u32,
}

impl ToyBatching {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.toys_per_job == 0 {
            return Err(ScanError::InvalidPartitionRequest(
                "toys per job must be at least 1".to_string(),
            ));
        }
        if self.toys_per_job > self.toys_total {
            return Err(ScanError::InvalidPartitionRequest(format!(
                "toys per job ({}) exceeds toys total ({})",
                self.toys_per_job, self.toys_total
            )));
        }
        Ok(())
    }

    /// Jobs per lattice point: one for every `toys_per_job` step through `toys_total`.
    pub fn group_count(&self) -> usize {
        self.toys_total.div_ceil(self.toys_per_job.max(1)) as usize
    }
}

/// Emits `groups × lattice points` descriptors, point-major in row-major lattice order.
pub fn batch_points(
    lattice: &Lattice,
    batching: &ToyBatching,
    reference_id: &str,
) -> Result<Vec<JobDescriptor>, ScanError> {
    batching.validate()?;

    let groups = batching.group_count();
    let mut jobs = Vec::with_capacity(checked_job_count(&[lattice.len(), groups])?);
    for point in lattice.points() {
        jobs.extend((0..groups).map(|_| JobDescriptor {
            reference_id: reference_id.to_string(),
            axis1: AxisRange::point(point.value1),
            axis2: AxisRange::point(point.value2),
            subset_offset: 0,
            layer_index: 0,
            repeats: batching.toys_per_job,
        }));
    }

    debug!(
        points = lattice.len(),
        groups_per_point = groups,
        jobs = jobs.len(),
        "batched lattice points"
    );
    Ok(jobs)
}
