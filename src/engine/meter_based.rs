//! Calculations for coordinate systems measured in flat meters

use log::debug;
use crate::coordinate::{CoordinateSystemDefinition, DeviceViewport, Envelope, Point};
use crate::errors::ScaleResult;
use super::{validate_envelope, validate_point, validate_scale, validate_viewport, ScaleCalculator};

/// A coordinate system whose axis units are meters on an undistorted plane
#[derive(Debug, Clone, PartialEq)]
pub struct MeterBasedCoordinateSystem {
    definition: CoordinateSystemDefinition,
}

impl Default for MeterBasedCoordinateSystem {
    fn default() -> Self {
        Self::new(CoordinateSystemDefinition::local_meters())
    }
}

impl MeterBasedCoordinateSystem {
    /// Treat `definition` as flat meters
    pub fn new(definition: CoordinateSystemDefinition) -> Self {
        MeterBasedCoordinateSystem { definition }
    }

    /// The definition this instance was built for
    pub fn definition(&self) -> &CoordinateSystemDefinition {
        &self.definition
    }
}

impl ScaleCalculator for MeterBasedCoordinateSystem {
    fn calculate_scale(&self, envelope: &Envelope, viewport: &DeviceViewport) -> ScaleResult<f64> {
        validate_envelope(envelope)?;
        validate_viewport(viewport)?;

        let width_scale = envelope.width() / viewport.width_meters();
        let height_scale = envelope.height() / viewport.height_meters();
        let scale = width_scale.max(height_scale);

        debug!("Scale for {}x{} m on {}x{} px @ {} dpi: width 1:{}, height 1:{} -> 1:{}",
               envelope.width(), envelope.height(),
               viewport.width_pixels, viewport.height_pixels, viewport.dpi,
               width_scale, height_scale, scale);

        Ok(scale)
    }

    fn adjust_bounding_box(&self, envelope: &Envelope, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        validate_envelope(envelope)?;
        self.envelope_at_scale(&envelope.center(), scale, viewport)
    }

    fn distance_in_meters(&self, p1: &Point, p2: &Point) -> ScaleResult<f64> {
        validate_point(p1)?;
        validate_point(p2)?;
        Ok((p2.x - p1.x).hypot(p2.y - p1.y))
    }

    fn envelope_at_scale(&self, center: &Point, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        validate_point(center)?;
        validate_scale(scale)?;
        validate_viewport(viewport)?;

        let width = scale * viewport.width_meters();
        let height = scale * viewport.height_meters();
        debug!("Extent at 1:{} around ({}, {}): {} x {} m", scale, center.x, center.y, width, height);

        Ok(Envelope::from_center(center, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::errors::ScaleError;

    fn vp(w: u32, h: u32) -> DeviceViewport {
        DeviceViewport::new(w, h, 96.0).unwrap()
    }

    #[test]
    fn test_matching_aspect_ratio() {
        let cs = MeterBasedCoordinateSystem::default();
        let env = Envelope::new(0.0, 0.0, 1000.0, 500.0);
        let scale = cs.calculate_scale(&env, &vp(200, 100)).unwrap();

        // 200 px / 96 dpi * 0.0254 m = 0.0529166.. m
        assert_relative_eq!(scale, 1000.0 / (200.0 / 96.0 * 0.0254), max_relative = 1e-12);
        assert_relative_eq!(scale, 18897.6378, max_relative = 1e-8);
    }

    #[test]
    fn test_mismatched_aspect_ratio_takes_larger() {
        let cs = MeterBasedCoordinateSystem::default();
        let env = Envelope::new(0.0, 0.0, 1000.0, 500.0);
        let scale = cs.calculate_scale(&env, &vp(100, 100)).unwrap();

        assert_relative_eq!(scale, 37795.2756, max_relative = 1e-8);
    }

    #[test]
    fn test_tall_envelope_bound_by_height() {
        let cs = MeterBasedCoordinateSystem::default();
        let env = Envelope::new(0.0, 0.0, 100.0, 2000.0);
        let scale = cs.calculate_scale(&env, &vp(100, 100)).unwrap();
        assert_relative_eq!(scale, 2000.0 / (100.0 / 96.0 * 0.0254), max_relative = 1e-12);
    }

    #[test]
    fn test_scale_invariant_under_uniform_scaling() {
        let cs = MeterBasedCoordinateSystem::default();
        let a = cs.calculate_scale(&Envelope::new(0.0, 0.0, 1000.0, 700.0), &vp(300, 200)).unwrap();
        let b = cs.calculate_scale(&Envelope::new(0.0, 0.0, 2000.0, 1400.0), &vp(600, 400)).unwrap();
        assert_relative_eq!(a, b, max_relative = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        let cs = MeterBasedCoordinateSystem::default();
        let flat = Envelope::new(5.0, 0.0, 5.0, 10.0);
        assert!(matches!(cs.calculate_scale(&flat, &vp(100, 100)), Err(ScaleError::InvalidExtent(_))));

        let env = Envelope::new(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(cs.calculate_scale(&env, &vp(0, 100)), Err(ScaleError::InvalidExtent(_))));
        assert!(matches!(cs.adjust_bounding_box(&env, 0.0, &vp(100, 100)), Err(ScaleError::InvalidExtent(_))));
        assert!(matches!(cs.adjust_bounding_box(&env, f64::NAN, &vp(100, 100)), Err(ScaleError::InvalidExtent(_))));
        assert!(matches!(cs.adjust_bounding_box(&flat, 1000.0, &vp(100, 100)), Err(ScaleError::InvalidExtent(_))));
    }

    #[test]
    fn test_adjust_preserves_center_and_roundtrips() {
        let cs = MeterBasedCoordinateSystem::default();
        let env = Envelope::new(-1234.5, 600.25, 8765.5, 4000.75);
        let viewport = vp(640, 480);

        let adjusted = cs.adjust_bounding_box(&env, 25000.0, &viewport).unwrap();
        assert_relative_eq!(adjusted.center().x, env.center().x, epsilon = 1e-9);
        assert_relative_eq!(adjusted.center().y, env.center().y, epsilon = 1e-9);

        let scale = cs.calculate_scale(&adjusted, &viewport).unwrap();
        assert_relative_eq!(scale, 25000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_adjust_forces_viewport_aspect() {
        let cs = MeterBasedCoordinateSystem::default();
        let env = Envelope::new(0.0, 0.0, 1000.0, 500.0);
        let adjusted = cs.adjust_bounding_box(&env, 10000.0, &vp(100, 100)).unwrap();
        assert_relative_eq!(adjusted.width(), adjusted.height(), max_relative = 1e-12);
        assert_relative_eq!(adjusted.width(), 10000.0 * 100.0 / 96.0 * 0.0254, max_relative = 1e-12);
    }

    #[test]
    fn test_distance() {
        let cs = MeterBasedCoordinateSystem::default();
        let p = Point::new(3.0, 4.0);
        let q = Point::new(-3.0, -4.0);
        assert_eq!(cs.distance_in_meters(&p, &p).unwrap(), 0.0);
        assert_eq!(cs.distance_in_meters(&p, &q).unwrap(), 10.0);
        assert_eq!(cs.distance_in_meters(&q, &p).unwrap(), cs.distance_in_meters(&p, &q).unwrap());
    }

    #[test]
    fn test_initial_view_scale() {
        let cs = MeterBasedCoordinateSystem::default();
        let env = Envelope::new(0.0, 0.0, 1000.0, 500.0);
        let viewport = vp(100, 100);

        let uncapped = cs.initial_view_scale(&env, &viewport, None).unwrap();
        assert_relative_eq!(uncapped, 37795.2756, max_relative = 1e-8);

        assert_eq!(cs.initial_view_scale(&env, &viewport, Some(10000.0)).unwrap(), 9999.0);
        assert_relative_eq!(cs.initial_view_scale(&env, &viewport, Some(1e9)).unwrap(), uncapped);
        assert!(cs.initial_view_scale(&env, &viewport, Some(0.5)).is_err());
    }
}
