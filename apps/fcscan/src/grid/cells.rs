//! Cell partitioning — slices a lattice into rectangular tiles, one per work unit.
//!
//! Tiles are anchored every `cell_side` rows and columns, scanned row-major. A tile
//! whose nominal extent runs past the last row or column is clamped to the lattice
//! edge, and its point count along that axis shrinks to the indices still in bounds.
//! The clamped tile's value range still reaches the true boundary value.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::errors::ScanError;
use crate::grid::lattice::{Lattice, SamplePoint};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Value span of a cell along one axis, plus how many samples it covers.
///
/// Rendered for the fitter as `name,low,high,count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub low: f64,
    pub high: f64,
    pub count: u32,
}

impl AxisRange {
    /// A range collapsed onto a single sample.
    pub fn point(value: f64) -> Self {
        AxisRange {
            low: value,
            high: value,
            count: 1,
        }
    }
}

/// A rectangular block of lattice points. Row and column bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub rows: [usize; 2],
    pub cols: [usize; 2],
    pub axis1: AxisRange,
    pub axis2: AxisRange,
}

// ────────────────────────────────────────────────────────────────────────────
// Partitioning
// ────────────────────────────────────────────────────────────────────────────

/// Splits `lattice` into cells of `cell_side × cell_side` points, row-major.
///
/// Produces `ceil(rows / k) * ceil(cols / k)` cells. A zero-size lattice yields none.
pub fn partition(lattice: &Lattice, cell_side: usize) -> Result<Vec<Cell>, ScanError> {
    if cell_side == 0 {
        return Err(ScanError::InvalidPartitionRequest(
            "cell side must be at least 1".to_string(),
        ));
    }
    if lattice.is_empty() {
        return Ok(Vec::new());
    }

    let last_row = lattice.rows() - 1;
    let last_col = lattice.cols() - 1;
    let mut cells = Vec::with_capacity(
        lattice.rows().div_ceil(cell_side) * lattice.cols().div_ceil(cell_side),
    );

    for row_min in (0..lattice.rows()).step_by(cell_side) {
        let row_max = clamp_upper(row_min, cell_side, last_row);
        for col_min in (0..lattice.cols()).step_by(cell_side) {
            let col_max = clamp_upper(col_min, cell_side, last_col);

            let lo = corner(lattice, row_min, col_min)?;
            let hi = corner(lattice, row_max, col_max)?;

            cells.push(Cell {
                rows: [row_min, row_max],
                cols: [col_min, col_max],
                axis1: AxisRange {
                    low: lo.value1,
                    high: hi.value1,
                    count: in_bounds_count(row_min, row_max),
                },
                axis2: AxisRange {
                    low: lo.value2,
                    high: hi.value2,
                    count: in_bounds_count(col_min, col_max),
                },
            });
        }
    }

    Ok(cells)
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Tile corner lookup. A miss means the tiling walked off the lattice.
fn corner(lattice: &Lattice, row: usize, col: usize) -> Result<&SamplePoint, ScanError> {
    lattice.point(row, col).ok_or_else(|| {
        ScanError::Internal(anyhow!(
            "tile corner ({row}, {col}) outside {}x{} lattice",
            lattice.rows(),
            lattice.cols()
        ))
    })
}

/// Upper index of a tile starting at `start`, pulled back to `last` on overflow.
fn clamp_upper(start: usize, cell_side: usize, last: usize) -> usize {
    (start + cell_side - 1).min(last)
}

/// Samples between `start` and `end` inclusive. `end >= start` holds for every tile.
fn in_bounds_count(start: usize, end: usize) -> u32 {
    (end - start + 1) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
