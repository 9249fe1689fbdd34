//! Calculations for coordinate systems that are not flat meters
//!
//! Envelopes are moved into the local meter plane by transforming their four
//! corners and taking the bounding box of the results. This is exact for
//! linear units and an approximation for curved projections, which is good
//! enough across a single map view and keeps the transform cost to four points
//! per envelope.

use std::sync::Arc;
use log::{debug, info};
use crate::coordinate::{CoordinateSystemDefinition, DeviceViewport, Envelope, Point};
use crate::errors::{ScaleError, ScaleResult};
use crate::transform::{flatten, unflatten, PointTransform, TransformProvider};
use super::{validate_envelope, validate_point, validate_scale, validate_viewport, MeterBasedCoordinateSystem, ScaleCalculator};

/// A coordinate system normalized through a local meter plane
#[derive(Clone)]
pub struct ProjectedCoordinateSystem {
    definition: CoordinateSystemDefinition,
    local: MeterBasedCoordinateSystem,
    transform: Arc<dyn PointTransform>,
}

impl std::fmt::Debug for ProjectedCoordinateSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectedCoordinateSystem")
            .field("definition", &self.definition)
            .field("local", &self.local.definition())
            .finish()
    }
}

impl ProjectedCoordinateSystem {
    /// Build the transform between `definition` and the local meter plane
    ///
    /// Any failure of the provider surfaces as
    /// [`ScaleError::UnsupportedCoordinateSystem`].
    pub fn new(definition: CoordinateSystemDefinition, provider: &dyn TransformProvider) -> ScaleResult<Self> {
        let local = CoordinateSystemDefinition::local_meters();
        let transform = provider.resolve(&definition, &local).map_err(|e| match e {
            ScaleError::UnsupportedCoordinateSystem(msg) => ScaleError::UnsupportedCoordinateSystem(msg),
            other => ScaleError::UnsupportedCoordinateSystem(format!("'{}': {}", definition, other)),
        })?;

        info!("Built local meter transform for '{}'", definition);
        Ok(ProjectedCoordinateSystem {
            definition,
            local: MeterBasedCoordinateSystem::new(local),
            transform: Arc::from(transform),
        })
    }

    /// The definition this instance was built for
    pub fn definition(&self) -> &CoordinateSystemDefinition {
        &self.definition
    }

    fn to_local(&self, points: &[Point]) -> ScaleResult<Vec<Point>> {
        unflatten(&self.transform.forward(&flatten(points))?)
    }

    fn from_local(&self, points: &[Point]) -> ScaleResult<Vec<Point>> {
        unflatten(&self.transform.inverse(&flatten(points))?)
    }

    fn envelope_to_local(&self, envelope: &Envelope) -> ScaleResult<Envelope> {
        let local = self.to_local(&envelope.corners())?;
        bounding_envelope(&local)
    }

    fn envelope_from_local(&self, envelope: &Envelope) -> ScaleResult<Envelope> {
        let source = self.from_local(&envelope.corners())?;
        bounding_envelope(&source)
    }
}

fn bounding_envelope(points: &[Point]) -> ScaleResult<Envelope> {
    Envelope::from_points(points).ok_or_else(|| ScaleError::TransformFailure(
        "Transform returned no coordinates".to_string()
    ))
}

impl ScaleCalculator for ProjectedCoordinateSystem {
    fn calculate_scale(&self, envelope: &Envelope, viewport: &DeviceViewport) -> ScaleResult<f64> {
        validate_envelope(envelope)?;
        validate_viewport(viewport)?;

        let local = self.envelope_to_local(envelope)?;
        debug!("Envelope {:?} in '{}' is {:?} in local meters", envelope, self.definition, local);
        self.local.calculate_scale(&local, viewport)
    }

    fn adjust_bounding_box(&self, envelope: &Envelope, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        validate_envelope(envelope)?;
        validate_scale(scale)?;
        validate_viewport(viewport)?;

        let local = self.envelope_to_local(envelope)?;
        let adjusted = self.local.adjust_bounding_box(&local, scale, viewport)?;
        self.envelope_from_local(&adjusted)
    }

    fn distance_in_meters(&self, p1: &Point, p2: &Point) -> ScaleResult<f64> {
        validate_point(p1)?;
        validate_point(p2)?;

        let local = self.to_local(&[*p1, *p2])?;
        match local.as_slice() {
            [a, b] => self.local.distance_in_meters(a, b),
            _ => Err(ScaleError::TransformFailure(format!(
                "Expected 2 transformed points, got {}", local.len()
            ))),
        }
    }

    fn envelope_at_scale(&self, center: &Point, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        validate_point(center)?;
        validate_scale(scale)?;
        validate_viewport(viewport)?;

        let local = self.to_local(&[*center])?;
        let local_center = local.first().ok_or_else(|| ScaleError::TransformFailure(
            "Transform returned no coordinates".to_string()
        ))?;
        let extent = self.local.envelope_at_scale(local_center, scale, viewport)?;
        self.envelope_from_local(&extent)
    }
}
