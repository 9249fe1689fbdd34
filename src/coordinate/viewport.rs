//! Device viewport description

use crate::errors::{ScaleError, ScaleResult};

/// Meters in one inch
pub const METERS_PER_INCH: f64 = 0.0254;

/// Resolution assumed when a caller does not supply one
pub const DEFAULT_DPI: f64 = 96.0;

/// The physical rendering surface a map is drawn onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceViewport {
    /// Width in pixels
    pub width_pixels: u32,
    /// Height in pixels
    pub height_pixels: u32,
    /// Pixels per inch, always positive
    pub dpi: f64,
}

impl DeviceViewport {
    /// Create a viewport, rejecting a non-positive or non-finite DPI
    pub fn new(width_pixels: u32, height_pixels: u32, dpi: f64) -> ScaleResult<Self> {
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(ScaleError::InvalidExtent(format!("DPI must be positive, got {}", dpi)));
        }
        Ok(DeviceViewport { width_pixels, height_pixels, dpi })
    }

    /// Create a viewport at the default 96 DPI
    pub fn with_default_dpi(width_pixels: u32, height_pixels: u32) -> Self {
        DeviceViewport { width_pixels, height_pixels, dpi: DEFAULT_DPI }
    }

    /// Parse a size string ("WIDTHxHEIGHT") into a viewport at the given DPI
    pub fn from_size_string(size: &str, dpi: f64) -> ScaleResult<Self> {
        let (w, h) = size.trim().split_once(['x', 'X'])
            .ok_or_else(|| ScaleError::GenericError(
                format!("Size must be in format 'WIDTHxHEIGHT', got '{}'", size)))?;

        let width = w.trim().parse::<u32>()
            .map_err(|_| ScaleError::GenericError(format!("Invalid width: {}", w)))?;
        let height = h.trim().parse::<u32>()
            .map_err(|_| ScaleError::GenericError(format!("Invalid height: {}", h)))?;

        Self::new(width, height, dpi)
    }

    /// Physical width of the surface in meters
    pub fn width_meters(&self) -> f64 {
        self.width_pixels as f64 / self.dpi * METERS_PER_INCH
    }

    /// Physical height of the surface in meters
    pub fn height_meters(&self) -> f64 {
        self.height_pixels as f64 / self.dpi * METERS_PER_INCH
    }

    /// True when either dimension is zero pixels
    pub fn is_degenerate(&self) -> bool {
        self.width_pixels == 0 || self.height_pixels == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_physical_size() {
        let vp = DeviceViewport::new(96, 192, 96.0).unwrap();
        assert_relative_eq!(vp.width_meters(), 0.0254);
        assert_relative_eq!(vp.height_meters(), 0.0508);
    }

    #[test]
    fn test_rejects_bad_dpi() {
        assert!(matches!(DeviceViewport::new(10, 10, 0.0), Err(ScaleError::InvalidExtent(_))));
        assert!(DeviceViewport::new(10, 10, -96.0).is_err());
        assert!(DeviceViewport::new(10, 10, f64::NAN).is_err());
    }

    #[test]
    fn test_parse_size() {
        let vp = DeviceViewport::from_size_string("800x600", 72.0).unwrap();
        assert_eq!((vp.width_pixels, vp.height_pixels), (800, 600));
        assert_eq!(vp.dpi, 72.0);

        assert!(DeviceViewport::from_size_string("800", 96.0).is_err());
        assert!(DeviceViewport::from_size_string("-1x5", 96.0).is_err());
    }

    #[test]
    fn test_zero_dimension_is_degenerate() {
        assert!(DeviceViewport::with_default_dpi(0, 100).is_degenerate());
        assert!(!DeviceViewport::with_default_dpi(1, 1).is_degenerate());
    }
}
