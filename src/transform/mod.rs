//! Coordinate transformation providers
//!
//! The scale engine never does projection math itself. It asks a
//! [`TransformProvider`] for a [`PointTransform`] between a source coordinate
//! system and the flat local meter plane, then pushes raw coordinate pairs
//! through it.
//!
//! # Thread safety
//!
//! Transforms handed out by a provider must be `Send + Sync`; the engine shares
//! one transform across every call made on a coordinate system instance and
//! may do so from several threads. A provider backed by a library that is not
//! safe for concurrent use has to serialize access inside its own transform.

mod affine;
mod builtin;
mod catalog;
mod identity;
mod spherical;

pub use self::affine::{AffineTransform, AffineTransformProvider};
pub use self::builtin::BuiltinTransformProvider;
pub use self::catalog::{CatalogEntry, CoordinateSystemCatalog, CoordinateSystemKind};
pub use self::identity::{IdentityTransform, IdentityTransformProvider};

use crate::coordinate::{CoordinateSystemDefinition, Point};
use crate::errors::{ScaleError, ScaleResult};

/// Forward and inverse mapping between two coordinate systems
///
/// Both directions take and return flat `[x0, y0, x1, y1, ...]` sequences.
pub trait PointTransform: Send + Sync {
    /// Map coordinates from the source system into the target system
    fn forward(&self, coords: &[f64]) -> ScaleResult<Vec<f64>>;

    /// Map coordinates from the target system back into the source system
    fn inverse(&self, coords: &[f64]) -> ScaleResult<Vec<f64>>;
}

/// Builds transforms between coordinate system definitions
pub trait TransformProvider {
    /// Resolve a transform from `source` to `target`
    ///
    /// Fails with [`ScaleError::UnsupportedCoordinateSystem`] when either
    /// definition is not understood.
    fn resolve(
        &self,
        source: &CoordinateSystemDefinition,
        target: &CoordinateSystemDefinition,
    ) -> ScaleResult<Box<dyn PointTransform>>;

    /// Whether `definition` already measures a flat plane in meters
    fn is_meter_cartesian(&self, definition: &CoordinateSystemDefinition) -> bool {
        definition.is_local_meters()
    }
}

/// Flatten points into an `[x0, y0, x1, y1, ...]` sequence
pub fn flatten(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Rebuild points from an `[x0, y0, x1, y1, ...]` sequence
pub fn unflatten(coords: &[f64]) -> ScaleResult<Vec<Point>> {
    check_pairs(coords)?;
    Ok(coords.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect())
}

/// Apply a per-pair mapping to a flat coordinate sequence
pub(crate) fn map_pairs<F>(coords: &[f64], mut f: F) -> ScaleResult<Vec<f64>>
where
    F: FnMut(f64, f64) -> ScaleResult<(f64, f64)>,
{
    check_pairs(coords)?;
    let mut out = Vec::with_capacity(coords.len());
    for pair in coords.chunks_exact(2) {
        let (x, y) = f(pair[0], pair[1])?;
        out.push(x);
        out.push(y);
    }
    Ok(out)
}

fn check_pairs(coords: &[f64]) -> ScaleResult<()> {
    if coords.len() % 2 != 0 {
        return Err(ScaleError::TransformFailure(format!(
            "Expected (x, y) pairs but got {} values", coords.len()
        )));
    }
    Ok(())
}

/// Reject odd-length sequences and NaN or infinite ordinates
pub(crate) fn check_finite(coords: &[f64]) -> ScaleResult<()> {
    check_pairs(coords)?;
    if let Some(bad) = coords.iter().find(|v| !v.is_finite()) {
        return Err(ScaleError::TransformFailure(format!("Non-finite coordinate: {}", bad)));
    }
    Ok(())
}
