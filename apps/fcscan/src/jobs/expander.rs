//! Cell replication — copies the partition across dataset subsets and scan layers.
//!
//! Output order is fixed: layer (outermost), then subset, then cell in partition
//! order. Downstream tooling relies on the order being reproducible.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ScanError;
use crate::grid::Cell;
use crate::jobs::descriptor::JobDescriptor;

/// How many times the cell list is repeated, and how subsets are spaced in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replication {
    /// Number of distinct dataset slices.
    pub subset_count: u32,
    /// Entry distance between consecutive subsets.
    pub subset_stride: u64,
    /// Independent repeats of the whole scan.
    pub layer_count: u32,
}

/// Upper bound on descriptors produced by a single split.
pub const MAX_JOBS: usize = 10_000_000;

impl Replication {
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.subset_count == 0 {
            return Err(ScanError::InvalidPartitionRequest(
                "subset count must be at least 1".to_string(),
            ));
        }
        if self.layer_count == 0 {
            return Err(ScanError::InvalidPartitionRequest(
                "layer count must be at least 1".to_string(),
            ));
        }
        if self.subset_stride.checked_mul(u64::from(self.subset_count - 1)).is_none() {
            return Err(ScanError::InvalidPartitionRequest(format!(
                "subset offsets overflow: {} subsets at stride {}",
                self.subset_count, self.subset_stride
            )));
        }
        Ok(())
    }

    /// Descriptors produced for `cells` cells, or an error past `MAX_JOBS`.
    pub fn job_count(&self, cells: usize) -> Result<usize, ScanError> {
        checked_job_count(&[cells, self.subset_count as usize, self.layer_count as usize])
    }
}

/// Product of `factors`, rejected on overflow or when it exceeds `MAX_JOBS`.
pub(crate) fn checked_job_count(factors: &[usize]) -> Result<usize, ScanError> {
    let total = factors
        .iter()
        .try_fold(1usize, |acc, &f| acc.checked_mul(f))
        .filter(|&n| n <= MAX_JOBS);
    total.ok_or_else(|| {
        ScanError::InvalidPartitionRequest(format!(
            "job count {} exceeds the limit of {MAX_JOBS}",
            factors
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(" x ")
        ))
    })
}

/// Replicates `cells` into `cells.len() * subset_count * layer_count` descriptors.
pub fn expand(
    cells: &[Cell],
    replication: &Replication,
    reference_id: &str,
    repeats: u32,
) -> Result<Vec<JobDescriptor>, ScanError> {
    replication.validate()?;

    let mut jobs = Vec::with_capacity(replication.job_count(cells.len())?);
    for layer_index in 0..replication.layer_count {
        for subset in 0..replication.subset_count {
            let subset_offset = u64::from(subset) * replication.subset_stride;
            jobs.extend(cells.iter().map(|cell| JobDescriptor {
                reference_id: reference_id.to_string(),
                axis1: cell.axis1,
                axis2: cell.axis2,
                subset_offset,
                layer_index,
                repeats,
            }));
        }
    }

    debug!(
        cells = cells.len(),
        subsets = replication.subset_count,
        layers = replication.layer_count,
        jobs = jobs.len(),
        "expanded cell partition"
    );
    Ok(jobs)
}
