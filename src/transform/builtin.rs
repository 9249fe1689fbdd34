//! Catalog-backed transform provider
//!
//! Resolves catalogued coordinate systems into the flat local meter plane.
//! Linear systems are scaled by their unit size; geographic and Web Mercator
//! systems go through a spherical sinusoidal mapping centered on an origin
//! near the data, so that lengths there come out in ground meters. Angular
//! systems cannot be resolved without that origin.

use std::sync::Arc;
use log::{debug, info};
use crate::coordinate::{CoordinateSystemDefinition, Point};
use crate::errors::{ScaleError, ScaleResult};
use super::catalog::{CatalogEntry, CoordinateSystemCatalog, CoordinateSystemKind};
use super::identity::IdentityTransform;
use super::spherical::{geographic_to_web_mercator, web_mercator_to_geographic, LocalSinusoidal};
use super::{map_pairs, AffineTransform, PointTransform, TransformProvider};

/// Transform provider driven by a [`CoordinateSystemCatalog`]
#[derive(Debug, Clone)]
pub struct BuiltinTransformProvider {
    catalog: Arc<CoordinateSystemCatalog>,
    origin: Option<Point>,
}

impl Default for BuiltinTransformProvider {
    fn default() -> Self {
        BuiltinTransformProvider { catalog: CoordinateSystemCatalog::shared_builtin(), origin: None }
    }
}

impl BuiltinTransformProvider {
    /// Provider over the given catalog, without a local frame origin
    pub fn new(catalog: CoordinateSystemCatalog) -> Self {
        BuiltinTransformProvider { catalog: Arc::new(catalog), origin: None }
    }

    /// Center the local frame of angular systems on `origin`
    ///
    /// `origin` is in the source system's units. It has no effect on linear
    /// systems. The catalog is shared, not copied.
    pub fn centered_on(mut self, origin: Point) -> Self {
        self.origin = Some(origin);
        self
    }

    /// A copy of this provider anchored on `origin`
    pub fn anchored(&self, origin: Point) -> Self {
        self.clone().centered_on(origin)
    }

    /// The catalog this provider resolves against
    pub fn catalog(&self) -> &CoordinateSystemCatalog {
        &self.catalog
    }

    fn entry(&self, definition: &CoordinateSystemDefinition) -> ScaleResult<&CatalogEntry> {
        self.catalog.lookup(definition).ok_or_else(|| ScaleError::UnsupportedCoordinateSystem(
            format!("No transform known for '{}'", definition)
        ))
    }

    /// Origin of the local frame in degrees for the given angular entry
    fn origin_degrees(&self, entry: &CatalogEntry) -> ScaleResult<(f64, f64)> {
        // a sinusoidal frame far from its center shears lengths
        let origin = self.origin.ok_or_else(|| ScaleError::UnsupportedCoordinateSystem(format!(
            "{} is angular and needs a local frame origin near the data", entry.code
        )))?;
        let converted = match entry.kind {
            CoordinateSystemKind::WebMercator { radius } => web_mercator_to_geographic(origin.x, origin.y, radius),
            _ => Ok((origin.x, origin.y)),
        };
        converted
            .and_then(|(lon, lat)| if lat.abs() < 90.0 {
                Ok((lon, lat))
            } else {
                Err(ScaleError::TransformFailure(format!("Latitude {} cannot anchor a local frame", lat)))
            })
            .map_err(|e| ScaleError::UnsupportedCoordinateSystem(
                format!("Invalid local frame origin ({}, {}): {}", origin.x, origin.y, e)
            ))
    }
}

impl TransformProvider for BuiltinTransformProvider {
    fn resolve(
        &self,
        source: &CoordinateSystemDefinition,
        target: &CoordinateSystemDefinition,
    ) -> ScaleResult<Box<dyn PointTransform>> {
        if !target.is_local_meters() {
            return Err(ScaleError::UnsupportedCoordinateSystem(format!(
                "Built-in transforms only target the local meter plane, not '{}'", target
            )));
        }
        if source.is_local_meters() {
            return Ok(Box::new(IdentityTransform));
        }

        let entry = self.entry(source)?;
        info!("Resolved {} ({}) to local meters", entry.code, entry.name);

        let transform: Box<dyn PointTransform> = match entry.kind {
            CoordinateSystemKind::Linear { meters_per_unit } => {
                Box::new(AffineTransform::uniform(meters_per_unit)?)
            },
            CoordinateSystemKind::Geographic { radius } => {
                let (lon0, lat0) = self.origin_degrees(entry)?;
                debug!("Geographic local frame centered on ({}, {})", lon0, lat0);
                Box::new(GeographicTransform { local: LocalSinusoidal::new(radius, lon0, lat0) })
            },
            CoordinateSystemKind::WebMercator { radius } => {
                let (lon0, lat0) = self.origin_degrees(entry)?;
                debug!("Web Mercator local frame centered on ({}, {})", lon0, lat0);
                Box::new(WebMercatorTransform { radius, local: LocalSinusoidal::new(radius, lon0, lat0) })
            },
        };
        Ok(transform)
    }

    fn is_meter_cartesian(&self, definition: &CoordinateSystemDefinition) -> bool {
        definition.is_local_meters()
            || self.catalog.lookup(definition).is_some_and(CatalogEntry::is_meter_cartesian)
    }
}

/// Longitude/latitude degrees to local meters
struct GeographicTransform {
    local: LocalSinusoidal,
}

impl PointTransform for GeographicTransform {
    fn forward(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        map_pairs(coords, |lon, lat| self.local.forward(lon, lat))
    }

    fn inverse(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        map_pairs(coords, |x, y| self.local.inverse(x, y))
    }
}

/// Web Mercator meters to local meters via geographic degrees
struct WebMercatorTransform {
    radius: f64,
    local: LocalSinusoidal,
}

impl PointTransform for WebMercatorTransform {
    fn forward(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        map_pairs(coords, |x, y| {
            let (lon, lat) = web_mercator_to_geographic(x, y, self.radius)?;
            self.local.forward(lon, lat)
        })
    }

    fn inverse(&self, coords: &[f64]) -> ScaleResult<Vec<f64>> {
        map_pairs(coords, |x, y| {
            let (lon, lat) = self.local.inverse(x, y)?;
            geographic_to_web_mercator(lon, lat, self.radius)
        })
    }
}
