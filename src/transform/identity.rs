//! Identity transform

use super::{check_finite, PointTransform, TransformProvider};
use crate::coordinate::CoordinateSystemDefinition;
use crate::errors::ScaleResult;

/// Passes coordinates through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl PointTransform for IdentityTransform {
    fn forward(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        check_finite(coords)?;
        Ok(coords.to_vec())
    }

    fn inverse(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        check_finite(coords)?;
        Ok(coords.to_vec())
    }
}

/// Resolves every pair of definitions to [`IdentityTransform`]
///
/// Useful for data that is already in local meters under some other name, and
/// for exercising the wrapped code path in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformProvider;

impl TransformProvider for IdentityTransformProvider {
    fn resolve(
        &self,
        _source: &CoordinateSystemDefinition,
        _target: &CoordinateSystemDefinition,
    ) -> ScaleResult<Box<dyn PointTransform>> {
        Ok(Box::new(IdentityTransform))
    }

    fn is_meter_cartesian(&self, _definition: &CoordinateSystemDefinition) -> bool {
        false
    }
}
