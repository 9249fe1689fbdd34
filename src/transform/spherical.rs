//! Spherical mappings between angular or mercator coordinates and local meters
//!
//! forward: x = R·(λ - λ₀)·cos(φ), y = R·(φ - φ₀)
//! inverse: φ = φ₀ + y/R, λ = λ₀ + x/(R·cos(φ))
//!
//! Distances along any parallel and along the central meridian come out in true
//! meters, which is what scale and distance calculations need.

use std::f64::consts::PI;
use log::debug;
use crate::errors::{ScaleError, ScaleResult};

/// Earth radius in meters used for spherical transformations
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Highest latitude representable in spherical Web Mercator
pub const WEB_MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Sinusoidal mapping of a sphere onto a local meter plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSinusoidal {
    radius: f64,
    lon0: f64,
    lat0: f64,
}

impl LocalSinusoidal {
    /// Create a mapping centered on (`lon0`, `lat0`), in degrees
    pub fn new(radius: f64, lon0: f64, lat0: f64) -> Self {
        LocalSinusoidal { radius, lon0, lat0 }
    }

    /// Degrees to local meters
    pub fn forward(&self, lon: f64, lat: f64) -> ScaleResult<(f64, f64)> {
        if !(lon.is_finite() && lat.is_finite()) || lat.abs() > 90.0 {
            return Err(ScaleError::TransformFailure(format!(
                "Geographic coordinate ({}, {}) is outside the valid latitude range", lon, lat
            )));
        }

        let x = self.radius * (lon - self.lon0).to_radians() * lat.to_radians().cos();
        let y = self.radius * (lat - self.lat0).to_radians();
        Ok((x, y))
    }

    /// Local meters to degrees
    pub fn inverse(&self, x: f64, y: f64) -> ScaleResult<(f64, f64)> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(ScaleError::TransformFailure(format!("Non-finite local coordinate ({}, {})", x, y)));
        }

        let lat = self.lat0 + (y / self.radius).to_degrees();
        if lat.abs() > 90.0 {
            return Err(ScaleError::TransformFailure(format!(
                "Local coordinate ({}, {}) maps beyond the pole (latitude {})", x, y, lat
            )));
        }

        // longitude is undefined at the poles
        let cos_lat = lat.to_radians().cos();
        if cos_lat.abs() < 1e-12 {
            return Err(ScaleError::TransformFailure(format!(
                "Local coordinate ({}, {}) maps onto a pole", x, y
            )));
        }

        let lon = self.lon0 + (x / (self.radius * cos_lat)).to_degrees();
        Ok((lon, lat))
    }
}

/// Convert spherical Web Mercator meters to longitude/latitude degrees
pub fn web_mercator_to_geographic(x: f64, y: f64, radius: f64) -> ScaleResult<(f64, f64)> {
    let max_extent = radius * PI;
    if !(x.is_finite() && y.is_finite()) || y.abs() > max_extent * (1.0 + 1e-12) {
        return Err(ScaleError::TransformFailure(format!(
            "Web Mercator coordinate ({}, {}) is outside the projection's valid extent", x, y
        )));
    }

    let lon = (x / radius).to_degrees();
    let lat = (2.0 * f64::atan(f64::exp(y / radius)) - PI / 2.0).to_degrees();

    debug!("Transformed Web Mercator ({}, {}) to geographic ({}, {})", x, y, lon, lat);
    Ok((lon, lat))
}

/// Convert longitude/latitude degrees to spherical Web Mercator meters
pub fn geographic_to_web_mercator(lon: f64, lat: f64, radius: f64) -> ScaleResult<(f64, f64)> {
    if !(lon.is_finite() && lat.is_finite()) || lat.abs() > WEB_MERCATOR_MAX_LATITUDE + 1e-9 {
        return Err(ScaleError::TransformFailure(format!(
            "Latitude {} is outside the Web Mercator range of +/-{}", lat, WEB_MERCATOR_MAX_LATITUDE
        )));
    }

    let x = radius * lon.to_radians();
    let y = radius * f64::ln(f64::tan(PI / 4.0 + lat.to_radians() / 2.0));

    debug!("Transformed geographic ({}, {}) to Web Mercator ({}, {})", lon, lat, x, y);
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sinusoidal_roundtrip() {
        let proj = LocalSinusoidal::new(EARTH_RADIUS, 10.0, 45.0);
        for &(lon, lat) in &[(10.0, 45.0), (12.5, 47.25), (-73.9857, 40.7484), (139.6917, 35.6895)] {
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_parallel_length_shrinks_with_latitude() {
        let proj = LocalSinusoidal::new(EARTH_RADIUS, 0.0, 0.0);
        let one_degree = EARTH_RADIUS * PI / 180.0;

        let (x_eq, _) = proj.forward(1.0, 0.0).unwrap();
        assert_relative_eq!(x_eq, one_degree, max_relative = 1e-12);

        let (x_60, _) = proj.forward(1.0, 60.0).unwrap();
        assert_relative_eq!(x_60, one_degree * 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_sinusoidal_domain() {
        let proj = LocalSinusoidal::new(EARTH_RADIUS, 0.0, 0.0);
        assert!(proj.forward(0.0, 90.5).is_err());
        assert!(proj.forward(f64::NAN, 0.0).is_err());
        assert!(proj.inverse(0.0, EARTH_RADIUS * PI).is_err());
        assert!(proj.inverse(0.0, EARTH_RADIUS * PI / 2.0).is_err());
    }

    #[test]
    fn test_web_mercator_roundtrip() {
        let (x, y) = geographic_to_web_mercator(-74.006, 40.7128, EARTH_RADIUS).unwrap();
        let (lon, lat) = web_mercator_to_geographic(x, y, EARTH_RADIUS).unwrap();
        assert_relative_eq!(lon, -74.006, epsilon = 1e-9);
        assert_relative_eq!(lat, 40.7128, epsilon = 1e-9);
    }

    #[test]
    fn test_web_mercator_domain() {
        assert!(geographic_to_web_mercator(0.0, 89.0, EARTH_RADIUS).is_err());
        assert!(web_mercator_to_geographic(0.0, 3.0e7, EARTH_RADIUS).is_err());
    }
}
