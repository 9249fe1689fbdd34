use log::info;
use crate::config::EngineConfig;
use crate::coordinate::{CoordinateSystemDefinition, DeviceViewport, Envelope, Point};
use crate::engine::{CoordinateSystem, ScaleCalculator};
use crate::errors::ScaleResult;
use crate::transform::BuiltinTransformProvider;

/// Main interface to the ScaleKit library
///
/// Takes coordinate system definitions as strings and builds a coordinate
/// system per call, with the local meter frame anchored on the data being
/// measured.
pub struct ScaleKit {
    config: EngineConfig,
    provider: BuiltinTransformProvider,
}

impl ScaleKit {
    /// Create a ScaleKit instance with default configuration
    pub fn new() -> ScaleResult<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a ScaleKit instance from a configuration
    ///
    /// # Returns
    /// A ScaleKit instance or an error if the configured catalog cannot be loaded
    pub fn with_config(config: EngineConfig) -> ScaleResult<Self> {
        let provider = config.provider()?;
        info!("ScaleKit ready with {} catalogued coordinate systems", provider.catalog().len());
        Ok(ScaleKit { config, provider })
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A viewport, falling back to the configured DPI
    pub fn viewport(&self, width_pixels: u32, height_pixels: u32, dpi: Option<f64>) -> ScaleResult<DeviceViewport> {
        DeviceViewport::new(width_pixels, height_pixels, dpi.unwrap_or(self.config.default_dpi))
    }

    /// Build a coordinate system without a local frame anchor
    ///
    /// Works for meter and other linear systems. Angular systems fail with
    /// `UnsupportedCoordinateSystem`; use [`ScaleKit::coordinate_system_near`].
    pub fn coordinate_system(&self, crs: &str) -> ScaleResult<CoordinateSystem> {
        CoordinateSystem::create(CoordinateSystemDefinition::new(crs), &self.provider)
    }

    /// Build a coordinate system with its local frame anchored on `anchor`
    ///
    /// # Arguments
    /// * `crs` - Coordinate system definition or code
    /// * `anchor` - A point near the data, in the coordinate system's units
    pub fn coordinate_system_near(&self, crs: &str, anchor: Point) -> ScaleResult<CoordinateSystem> {
        CoordinateSystem::create(CoordinateSystemDefinition::new(crs), &self.provider.anchored(anchor))
    }

    /// Scale at which `envelope` fits `viewport`
    pub fn calculate_scale(&self, crs: &str, envelope: &Envelope, viewport: &DeviceViewport) -> ScaleResult<f64> {
        self.coordinate_system_near(crs, envelope.center())?
            .calculate_scale(envelope, viewport)
    }

    /// Re-size `envelope` around its center so `viewport` shows it at `scale`
    pub fn adjust_bounding_box(&self, crs: &str, envelope: &Envelope, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        self.coordinate_system_near(crs, envelope.center())?
            .adjust_bounding_box(envelope, scale, viewport)
    }

    /// Ground distance between two points in meters
    pub fn distance_in_meters(&self, crs: &str, p1: &Point, p2: &Point) -> ScaleResult<f64> {
        let midpoint = Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
        self.coordinate_system_near(crs, midpoint)?
            .distance_in_meters(p1, p2)
    }

    /// Extent of `viewport` centered on `center` at `scale`
    pub fn envelope_at_scale(&self, crs: &str, center: &Point, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope> {
        self.coordinate_system_near(crs, *center)?
            .envelope_at_scale(center, scale, viewport)
    }

    /// Scale a preview of `extent` opens at, capped by the largest layer scale
    pub fn initial_view_scale(
        &self,
        crs: &str,
        extent: &Envelope,
        viewport: &DeviceViewport,
        max_layer_scale: Option<f64>,
    ) -> ScaleResult<f64> {
        self.coordinate_system_near(crs, extent.center())?
            .initial_view_scale(extent, viewport, max_layer_scale)
    }
}
