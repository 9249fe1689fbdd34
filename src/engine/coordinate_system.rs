//! Variant selection for coordinate systems

use log::debug;
use crate::coordinate::{CoordinateSystemDefinition, DeviceViewport, Envelope, Point};
use crate::errors::ScaleResult;
use crate::transform::{BuiltinTransformProvider, TransformProvider};
use super::{MeterBasedCoordinateSystem, ProjectedCoordinateSystem, ScaleCalculator};

/// A coordinate system ready for scale and extent calculations
#[derive(Debug, Clone)]
pub enum CoordinateSystem {
    /// Native units are flat meters, no transform needed
    MeterBased(MeterBasedCoordinateSystem),
    /// Calculations go through a local meter plane
    Projected(ProjectedCoordinateSystem),
}

impl CoordinateSystem {
    /// Pick the variant for `definition`, resolving transforms through `provider`
    pub fn create(definition: CoordinateSystemDefinition, provider: &dyn TransformProvider) -> ScaleResult<Self> {
        if provider.is_meter_cartesian(&definition) {
            debug!("'{}' is meter based", definition);
            Ok(CoordinateSystem::MeterBased(MeterBasedCoordinateSystem::new(definition)))
        } else {
            debug!("'{}' needs a local meter transform", definition);
            Ok(CoordinateSystem::Projected(ProjectedCoordinateSystem::new(definition, provider)?))
        }
    }

    /// Pick the variant for `definition` using the built-in catalog
    ///
    /// Angular systems (geographic, Web Mercator) fail with
    /// [`ScaleError::UnsupportedCoordinateSystem`] here because their local
    /// frame has to sit near the data; use [`CoordinateSystem::from_definition_near`].
    ///
    /// [`ScaleError::UnsupportedCoordinateSystem`]: crate::errors::ScaleError::UnsupportedCoordinateSystem
    pub fn from_definition(definition: impl Into<CoordinateSystemDefinition>) -> ScaleResult<Self> {
        Self::create(definition.into(), &BuiltinTransformProvider::default())
    }

    /// Pick the variant for `definition` with the local frame centered on `anchor`
    ///
    /// `anchor` is a point near the data, in the definition's own units. It is
    /// ignored by linear systems, so any definition can be built this way.
    pub fn from_definition_near(definition: impl Into<CoordinateSystemDefinition>, anchor: Point) -> ScaleResult<Self> {
        Self::create(definition.into(), &BuiltinTransformProvider::default().centered_on(anchor))
    }

    /// The definition this instance was built for
    pub fn definition(&self) -> &CoordinateSystemDefinition {
        match self {
            CoordinateSystem::MeterBased(cs) => cs.definition(),
            CoordinateSystem::Projected(cs) => cs.definition(),
        }
    }

    /// Whether calculations run without a transform
    pub fn is_meter_based(&self) -> bool {
        matches!(self, CoordinateSystem::MeterBased(_))
    }

    fn calculator(&self) -> &dyn ScaleCalculator {
        match self {
            CoordinateSystem::MeterBased(cs) => cs,
            CoordinateSystem::Projected(cs) => cs,
        }
    }
}

impl ScaleCalculator for CoordinateSystem {
    fn calculate_scale(&self, envelope: &Envelope, viewport: &DeviceViewport) -> ScaleResult<f64> {
        self.calculator().calculate_scale(envelope, viewport)
    }

    fn adjust_bounding_box(&self, envelope: &Envelope, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        self.calculator().adjust_bounding_box(envelope, scale, viewport)
    }

    fn distance_in_meters(&self, p1: &Point, p2: &Point) -> ScaleResult<f64> {
        self.calculator().distance_in_meters(p1, p2)
    }

    fn envelope_at_scale(&self, center: &Point, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        self.calculator().envelope_at_scale(center, scale, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ScaleError;
    use crate::transform::IdentityTransformProvider;

    #[test]
    fn test_local_meters_needs_no_transform() {
        let cs = CoordinateSystem::from_definition(CoordinateSystemDefinition::local_meters()).unwrap();
        assert!(cs.is_meter_based());

        let cs = CoordinateSystem::from_definition("EPSG:27700").unwrap();
        assert!(cs.is_meter_based());
    }

    #[test]
    fn test_other_units_are_wrapped() {
        for code in ["EPSG:4326", "EPSG:3857", "XY-FT"] {
            let cs = CoordinateSystem::from_definition_near(code, Point::new(0.0, 0.0)).unwrap();
            assert!(!cs.is_meter_based(), "{} should be projected", code);
            assert_eq!(cs.definition().as_str(), code);
        }
        assert!(!CoordinateSystem::from_definition("XY-FT").unwrap().is_meter_based());
    }

    #[test]
    fn test_angular_needs_anchor() {
        for code in ["EPSG:4326", "EPSG:3857"] {
            let res = CoordinateSystem::from_definition(code);
            assert!(matches!(res, Err(ScaleError::UnsupportedCoordinateSystem(_))), "{}", code);
        }
        // meter systems ignore the anchor
        let cs = CoordinateSystem::from_definition_near("XY-M", Point::new(120.0, 40.0)).unwrap();
        assert!(cs.is_meter_based());
    }

    #[test]
    fn test_unknown_definition_fails() {
        let res = CoordinateSystem::from_definition("EPSG:123456");
        assert!(matches!(res, Err(ScaleError::UnsupportedCoordinateSystem(_))));
    }

    #[test]
    fn test_provider_decides_meter_cartesian() {
        // the identity provider never claims meter units, so even the local plane is wrapped
        let cs = CoordinateSystem::create(CoordinateSystemDefinition::local_meters(), &IdentityTransformProvider).unwrap();
        assert!(!cs.is_meter_based());
    }

    #[test]
    fn test_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoordinateSystem>();

        let cs = std::sync::Arc::new(CoordinateSystem::from_definition_near("EPSG:4326", Point::new(2.0, 10.5)).unwrap());
        let handles: Vec<_> = (0..4).map(|i| {
            let cs = cs.clone();
            std::thread::spawn(move || {
                let env = Envelope::new(i as f64, 10.0, i as f64 + 1.0, 11.0);
                cs.calculate_scale(&env, &DeviceViewport::with_default_dpi(500, 500))
            })
        }).collect();
        for handle in handles {
            assert!(handle.join().unwrap().unwrap() > 0.0);
        }
    }

    #[test]
    fn test_dispatch_is_uniform() {
        let env = Envelope::new(0.0, 0.0, 1000.0, 500.0);
        let viewport = DeviceViewport::with_default_dpi(200, 100);

        let meters = CoordinateSystem::from_definition("XY-M").unwrap();
        let wrapped = CoordinateSystem::create("XY-M".into(), &IdentityTransformProvider).unwrap();

        let a = meters.calculate_scale(&env, &viewport).unwrap();
        let b = wrapped.calculate_scale(&env, &viewport).unwrap();
        assert!((a - b).abs() <= a * 1e-12);
    }
}
