//! Axis sampling — turns one scanned parameter range into its evenly spaced sample values.
//!
//! Step size is always `|max - min| / resolution`, so a reversed range still walks
//! upward from `min`. Both endpoints are sampled, giving `resolution + 1` values.

use serde::{Deserialize, Serialize};

use crate::errors::ScanError;

/// One scanned parameter dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
    /// Number of intervals between `min` and `max`; the axis has `resolution + 1` samples.
    pub resolution: u32,
}

impl AxisSpec {
    /// Builds and validates an axis from an explicit interval count.
    pub fn new(name: impl Into<String>, min: f64, max: f64, resolution: u32) -> Result<Self, ScanError> {
        let axis = AxisSpec {
            name: name.into(),
            min,
            max,
            resolution,
        };
        axis.validate()?;
        Ok(axis)
    }

    /// Builds an axis from the number of sample points wanted along it.
    ///
    /// `points = 40` means 40 samples, i.e. 39 intervals. Fewer than two points
    /// leaves no interval to step over and is rejected.
    pub fn from_point_count(
        name: impl Into<String>,
        min: f64,
        max: f64,
        points: u32,
    ) -> Result<Self, ScanError> {
        let name = name.into();
        if points < 2 {
            return Err(ScanError::InvalidAxisSpec(format!(
                "axis '{name}' needs at least 2 sample points, got {points}"
            )));
        }
        Self::new(name, min, max, points - 1)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.resolution < 1 {
            return Err(ScanError::InvalidAxisSpec(format!(
                "axis '{}' resolution must be at least 1",
                self.name
            )));
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ScanError::InvalidAxisSpec(format!(
                "axis '{}' bounds must be finite (min={}, max={})",
                self.name, self.min, self.max
            )));
        }
        Ok(())
    }

    /// Distance between neighbouring samples.
    pub fn step(&self) -> f64 {
        (self.max - self.min).abs() / self.resolution as f64
    }

    /// True when every sample collapses onto the same value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn samples(&self) -> Result<Vec<f64>, ScanError> {
        self.validate()?;
        sample(self.min, self.max, self.resolution)
    }
}

/// Returns `resolution + 1` values evenly spaced from `min`, inclusive of both ends.
pub fn sample(min: f64, max: f64, resolution: u32) -> Result<Vec<f64>, ScanError> {
    if resolution == 0 {
        return Err(ScanError::InvalidAxisSpec(
            "resolution must be at least 1".to_string(),
        ));
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(ScanError::InvalidAxisSpec(format!(
            "bounds must be finite (min={min}, max={max})"
        )));
    }

    let step = (max - min).abs() / resolution as f64;
    Ok((0..=resolution).map(|i| min + i as f64 * step).collect())
}
