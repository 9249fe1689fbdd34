//! Scale, extent and distance calculations
//!
//! All arithmetic lives in [`MeterBasedCoordinateSystem`]. Coordinate systems
//! whose units are not flat meters are handled by
//! [`ProjectedCoordinateSystem`], which moves inputs into a local meter plane,
//! delegates, and moves extents back. [`CoordinateSystem`] picks the right one
//! for a definition so callers never branch on it.

mod coordinate_system;
mod meter_based;
mod projected;

pub use self::coordinate_system::CoordinateSystem;
pub use self::meter_based::MeterBasedCoordinateSystem;
pub use self::projected::ProjectedCoordinateSystem;

use crate::coordinate::{DeviceViewport, Envelope, Point};
use crate::errors::{ScaleError, ScaleResult};

/// The calculations every coordinate system variant offers
pub trait ScaleCalculator {
    /// Representative-fraction scale at which `envelope` fits `viewport`
    ///
    /// Width and height are scaled independently and the larger result is
    /// returned, so the whole envelope stays visible.
    fn calculate_scale(&self, envelope: &Envelope, viewport: &DeviceViewport) -> ScaleResult<f64>;

    /// Envelope with the same center as `envelope`, sized so that `viewport`
    /// shows it at exactly `scale`
    fn adjust_bounding_box(&self, envelope: &Envelope, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope>;

    /// Ground distance between two points in meters
    fn distance_in_meters(&self, p1: &Point, p2: &Point) -> ScaleResult<f64>;

    /// Extent of `viewport` centered on `center` at `scale`
    fn envelope_at_scale(&self, center: &Point, scale: f64, viewport: &DeviceViewport) -> ScaleResult<Envelope>;

    /// Scale a map preview opens at
    ///
    /// The scale that fits `extent`, capped just below the largest layer
    /// visibility scale so at least one layer draws.
    fn initial_view_scale(
        &self,
        extent: &Envelope,
        viewport: &DeviceViewport,
        max_layer_scale: Option<f64>,
    ) -> ScaleResult<f64> {
        let extent_scale = self.calculate_scale(extent, viewport)?;
        match max_layer_scale {
            Some(max) if max.is_finite() => {
                let capped = (max - 0.5).floor();
                if capped <= 0.0 {
                    return Err(ScaleError::InvalidExtent(format!(
                        "Layer maximum scale {} leaves no visible scale range", max
                    )));
                }
                Ok(capped.min(extent_scale))
            },
            _ => Ok(extent_scale),
        }
    }
}

pub(crate) fn validate_envelope(envelope: &Envelope) -> ScaleResult<()> {
    if envelope.is_degenerate() {
        return Err(ScaleError::InvalidExtent(format!(
            "Envelope ({}, {}, {}, {}) has no area",
            envelope.min_x, envelope.min_y, envelope.max_x, envelope.max_y
        )));
    }
    Ok(())
}

pub(crate) fn validate_viewport(viewport: &DeviceViewport) -> ScaleResult<()> {
    if viewport.is_degenerate() {
        return Err(ScaleError::InvalidExtent(format!(
            "Viewport {}x{} has a zero dimension", viewport.width_pixels, viewport.height_pixels
        )));
    }
    if !(viewport.dpi.is_finite() && viewport.dpi > 0.0) {
        return Err(ScaleError::InvalidExtent(format!("Viewport DPI must be positive, got {}", viewport.dpi)));
    }
    Ok(())
}

pub(crate) fn validate_scale(scale: f64) -> ScaleResult<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ScaleError::InvalidExtent(format!("Scale must be positive, got {}", scale)));
    }
    Ok(())
}

pub(crate) fn validate_point(point: &Point) -> ScaleResult<()> {
    if !point.is_finite() {
        return Err(ScaleError::InvalidExtent(format!("Point ({}, {}) is not finite", point.x, point.y)));
    }
    Ok(())
}
