use serde::{Deserialize, Serialize};

use crate::errors::ScanError;
use crate::grid::{partition, Lattice};
use crate::jobs::descriptor::JobDescriptor;
use crate::jobs::expander::{expand, Replication};
use crate::jobs::points::{batch_points, ToyBatching};

/// How the lattice is turned into jobs. Chosen once, at configuration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Rectangular cells of `cell_side` points, replicated over subsets and layers.
    Cells {
        cell_side: usize,
        replication: Replication,
        /// Toys per cell job.
        repeats: u32,
    },
    /// Every lattice point on its own, with its toys split into batches.
    Points(ToyBatching),
}

/// Descriptors plus the number of work regions they were derived from.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Cells for the cell strategy, lattice points for the point strategy.
    pub regions: usize,
    pub descriptors: Vec<JobDescriptor>,
}

impl SplitStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SplitStrategy::Cells { .. } => "cells",
            SplitStrategy::Points(_) => "points",
        }
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        match self {
            SplitStrategy::Cells {
                cell_side,
                replication,
                ..
            } => {
                if *cell_side == 0 {
                    return Err(ScanError::InvalidPartitionRequest(
                        "cell side must be at least 1".to_string(),
                    ));
                }
                replication.validate()
            }
            SplitStrategy::Points(batching) => batching.validate(),
        }
    }

    pub fn split(&self, lattice: &Lattice, reference_id: &str) -> Result<SplitResult, ScanError> {
        match self {
            SplitStrategy::Cells {
                cell_side,
                replication,
                repeats,
            } => {
                let cells = partition(lattice, *cell_side)?;
                let descriptors = expand(&cells, replication, reference_id, *repeats)?;
                Ok(SplitResult {
                    regions: cells.len(),
                    descriptors,
                })
            }
            SplitStrategy::Points(batching) => Ok(SplitResult {
                regions: lattice.len(),
                descriptors: batch_points(lattice, batching, reference_id)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build;

    fn lattice_3x3() -> Lattice {
        build(&[0.0, 0.5, 1.0], &[0.0, 0.5, 1.0])
    }

    #[test]
    fn test_cells_strategy_partitions_then_expands() {
        let strategy = SplitStrategy::Cells {
            cell_side: 2,
            replication: Replication {
                subset_count: 2,
                subset_stride: 100,
                layer_count: 3,
            },
            repeats: 50,
        };
        let result = strategy.split(&lattice_3x3(), "fc.xml").unwrap();
        assert_eq!(result.regions, 4);
        assert_eq!(result.descriptors.len(), 4 * 2 * 3);
        assert!(result.descriptors.iter().all(|d| d.repeats == 50));
    }

    #[test]
    fn test_points_strategy_batches_each_point() {
        let strategy = SplitStrategy::Points(ToyBatching {
            toys_total: 200,
            toys_per_job: 20,
        });
        let result = strategy.split(&lattice_3x3(), "fc.xml").unwrap();
        assert_eq!(result.regions, 9);
        assert_eq!(result.descriptors.len(), 9 * 10);
    }

    #[test]
    fn test_validate_rejects_zero_cell_side() {
        let strategy = SplitStrategy::Cells {
            cell_side: 0,
            replication: Replication {
                subset_count: 1,
                subset_stride: 0,
                layer_count: 1,
            },
            repeats: 1,
        };
        assert!(matches!(
            strategy.validate(),
            Err(ScanError::InvalidPartitionRequest(_))
        ));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let strategy = SplitStrategy::Points(ToyBatching {
            toys_total: 10,
            toys_per_job: 5,
        });
        let json = serde_json::to_value(&strategy).unwrap();
        assert_eq!(json["kind"], "points");
        assert_eq!(json["toys_per_job"], 5);
        assert_eq!(strategy.name(), "points");
    }
}
