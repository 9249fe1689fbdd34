//! Fixed affine scaling transform

use super::{map_pairs, PointTransform, TransformProvider};
use crate::coordinate::CoordinateSystemDefinition;
use crate::errors::{ScaleError, ScaleResult};

/// `x' = x * scale_x + offset_x`, `y' = y * scale_y + offset_y`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl AffineTransform {
    /// Create an axis-aligned affine transform
    ///
    /// Both scale factors must be non-zero and finite so the inverse exists.
    pub fn new(scale_x: f64, scale_y: f64, offset_x: f64, offset_y: f64) -> ScaleResult<Self> {
        let valid = |v: f64| v.is_finite() && v != 0.0;
        if !(valid(scale_x) && valid(scale_y) && offset_x.is_finite() && offset_y.is_finite()) {
            return Err(ScaleError::UnsupportedCoordinateSystem(format!(
                "Affine transform is not invertible: scale=({}, {}), offset=({}, {})",
                scale_x, scale_y, offset_x, offset_y
            )));
        }
        Ok(AffineTransform { scale_x, scale_y, offset_x, offset_y })
    }

    /// Uniform scaling of both axes with no offset
    pub fn uniform(scale: f64) -> ScaleResult<Self> {
        Self::new(scale, scale, 0.0, 0.0)
    }
}

impl PointTransform for AffineTransform {
    fn forward(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        map_pairs(coords, |x, y| {
            finite(x * self.scale_x + self.offset_x, y * self.scale_y + self.offset_y)
        })
    }

    fn inverse(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        map_pairs(coords, |x, y| {
            finite((x - self.offset_x) / self.scale_x, (y - self.offset_y) / self.scale_y)
        })
    }
}

fn finite(x: f64, y: f64) -> ScaleResult<(f64, f64)> {
    if x.is_finite() && y.is_finite() {
        Ok((x, y))
    } else {
        Err(ScaleError::TransformFailure(format!("Affine result ({}, {}) is not finite", x, y)))
    }
}

/// Resolves every pair of definitions to one fixed [`AffineTransform`]
#[derive(Debug, Clone, Copy)]
pub struct AffineTransformProvider {
    transform: AffineTransform,
}

impl AffineTransformProvider {
    /// Provider handing out `transform` for any source definition
    pub fn new(transform: AffineTransform) -> Self {
        AffineTransformProvider { transform }
    }
}

impl TransformProvider for AffineTransformProvider {
    fn resolve(
        &self,
        _source: &CoordinateSystemDefinition,
        _target: &CoordinateSystemDefinition,
    ) -> ScaleResult<Box<dyn PointTransform>> {
        Ok(Box::new(self.transform))
    }

    fn is_meter_cartesian(&self, _definition: &CoordinateSystemDefinition) -> bool {
        false
    }
}
