use serde::{Deserialize, Serialize};

/// One lattice point: its integer coordinates and the pair of axis values it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub row: usize,
    pub col: usize,
    pub value1: f64,
    pub value2: f64,
}

/// Row-major 2-D grid of sample points. Rows follow axis 1, columns follow axis 2.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    points: Vec<SamplePoint>,
}

impl Lattice {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, row: usize, col: usize) -> Option<&SamplePoint> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.points.get(row * self.cols + col)
    }

    /// Points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = &SamplePoint> {
        self.points.iter()
    }
}

/// Combines two axis sample sequences into a lattice of `len1 × len2` points.
///
/// An empty input on either side yields a zero-size lattice.
pub fn build(axis1: &[f64], axis2: &[f64]) -> Lattice {
    if axis1.is_empty() || axis2.is_empty() {
        return Lattice {
            rows: 0,
            cols: 0,
            points: Vec::new(),
        };
    }

    let points = axis1
        .iter()
        .enumerate()
        .flat_map(|(row, &value1)| {
            axis2.iter().enumerate().map(move |(col, &value2)| SamplePoint {
                row,
                col,
                value1,
                value2,
            })
        })
        .collect();

    Lattice {
        rows: axis1.len(),
        cols: axis2.len(),
        points,
    }
}
