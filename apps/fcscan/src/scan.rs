//! Scan pipeline — axis sampling → lattice → split strategy → ordered job descriptors.
//!
//! Configuration is passed in as an immutable `ScanConfig`; nothing here reads the
//! environment or keeps state between calls, so identical inputs give identical output.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::ScanError;
use crate::grid::{build, AxisSpec};
use crate::jobs::{JobDescriptor, SplitStrategy};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Everything needed to split one two-parameter scan into jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub axis1: AxisSpec,
    pub axis2: AxisSpec,
    pub strategy: SplitStrategy,
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ScanError> {
        self.axis1.validate()?;
        self.axis2.validate()?;
        self.strategy.validate()
    }
}

/// Non-fatal findings. The scan still produces a valid (if degenerate) job list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// An axis has `min == max`; every sample along it is the same value.
    DegenerateAxis { axis: String, value: f64 },
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// `(rows, cols)` of the sampled lattice.
    pub lattice_shape: (usize, usize),
    /// Cells (or points) the descriptors were derived from.
    pub regions: usize,
    pub descriptors: Vec<JobDescriptor>,
    pub warnings: Vec<ScanWarning>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full split for `config`, tagging every descriptor with `reference_id`.
pub fn run_scan(config: &ScanConfig, reference_id: &str) -> Result<ScanOutcome, ScanError> {
    config.validate()?;

    let mut warnings = Vec::new();
    for axis in [&config.axis1, &config.axis2] {
        if axis.is_degenerate() {
            warn!(axis = %axis.name, value = axis.min, "axis has zero span; samples collapse to one value");
            warnings.push(ScanWarning::DegenerateAxis {
                axis: axis.name.clone(),
                value: axis.min,
            });
        }
        debug!(
            axis = %axis.name,
            min = axis.min,
            max = axis.max,
            resolution = axis.resolution,
            step = axis.step(),
            "sampling axis"
        );
    }

    let samples1 = config.axis1.samples()?;
    let samples2 = config.axis2.samples()?;
    let lattice = build(&samples1, &samples2);

    let split = config.strategy.split(&lattice, reference_id)?;
    info!(
        strategy = config.strategy.name(),
        rows = lattice.rows(),
        cols = lattice.cols(),
        regions = split.regions,
        jobs = split.descriptors.len(),
        "scan split complete"
    );

    Ok(ScanOutcome {
        lattice_shape: (lattice.rows(), lattice.cols()),
        regions: split.regions,
        descriptors: split.descriptors,
        warnings,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{Replication, ToyBatching};

    fn cells_config(points: u32, cell_side: usize) -> ScanConfig {
        ScanConfig {
            axis1: AxisSpec::from_point_count("Phi_s", -2.0, 0.0, points).unwrap(),
            axis2: AxisSpec::from_point_count("deltaGamma", -0.1, 0.2, points).unwrap(),
            strategy: SplitStrategy::Cells {
                cell_side,
                replication: Replication {
                    subset_count: 1,
                    subset_stride: 50_000_000,
                    layer_count: 5,
                },
                repeats: 200,
            },
        }
    }

    #[test]
    fn test_default_driver_scan_shape() {
        // 40 points per axis, one point per cell, five layers.
        let outcome = run_scan(&cells_config(40, 1), "fc.xml").unwrap();
        assert_eq!(outcome.lattice_shape, (40, 40));
        assert_eq!(outcome.regions, 1600);
        assert_eq!(outcome.descriptors.len(), 1600 * 5);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_first_and_last_jobs_hit_axis_bounds() {
        let outcome = run_scan(&cells_config(40, 1), "fc.xml").unwrap();
        let first = &outcome.descriptors[0];
        assert_eq!((first.axis1.low, first.axis2.low), (-2.0, -0.1));
        let last_of_layer = &outcome.descriptors[1599];
        assert!((last_of_layer.axis1.high - 0.0).abs() < 1e-9);
        assert!((last_of_layer.axis2.high - 0.2).abs() < 1e-9);
        assert_eq!(outcome.descriptors[1600].layer_index, 1);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let mut config = cells_config(4, 2);
        config.axis2.resolution = 0;
        assert!(matches!(
            run_scan(&config, "fc.xml"),
            Err(ScanError::InvalidAxisSpec(_))
        ));
        let mut config = cells_config(4, 2);
        config.axis1.resolution = 0;
        assert!(matches!(
            run_scan(&config, "fc.xml"),
            Err(ScanError::InvalidAxisSpec(_))
        ));
    }

    #[test]
    fn test_degenerate_axis_warns_but_succeeds() {
        let mut config = cells_config(3, 2);
        config.axis2 = AxisSpec::new("deltaGamma", 0.1, 0.1, 2).unwrap();
        let outcome = run_scan(&config, "fc.xml").unwrap();
        assert_eq!(
            outcome.warnings,
            vec![ScanWarning::DegenerateAxis {
                axis: "deltaGamma".to_string(),
                value: 0.1
            }]
        );
        assert!(outcome
            .descriptors
            .iter()
            .all(|d| d.axis2.low == 0.1 && d.axis2.high == 0.1));
    }

    #[test]
    fn test_points_strategy_runs_end_to_end() {
        let config = ScanConfig {
            axis1: AxisSpec::new("Phi_s", -3.0, 3.0, 2).unwrap(),
            axis2: AxisSpec::new("deltaGamma", -0.9, 0.9, 2).unwrap(),
            strategy: SplitStrategy::Points(ToyBatching {
                toys_total: 200,
                toys_per_job: 20,
            }),
        };
        let outcome = run_scan(&config, "FCXML.xml").unwrap();
        assert_eq!(outcome.regions, 9);
        assert_eq!(outcome.descriptors.len(), 90);
    }

    #[test]
    fn test_invalid_strategy_rejected_before_sampling() {
        let mut config = cells_config(4, 2);
        config.strategy = SplitStrategy::Points(ToyBatching {
            toys_total: 5,
            toys_per_job: 0,
        });
        assert!(matches!(
            run_scan(&config, "fc.xml"),
            Err(ScanError::InvalidPartitionRequest(_))
        ));
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let config = cells_config(7, 3);
        let a = run_scan(&config, "fc.xml").unwrap();
        let b = run_scan(&config, "fc.xml").unwrap();
        assert_eq!(a.descriptors, b.descriptors);
    }
}
