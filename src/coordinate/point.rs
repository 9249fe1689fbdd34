//! Point structure for representing coordinates

use crate::errors::{ScaleError, ScaleResult};

/// A point in the units of a single coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (longitude in geographic systems)
    pub x: f64,
    /// Y coordinate (latitude in geographic systems)
    pub y: f64,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Parse a point from a string (format: "x,y")
    pub fn from_string(point_str: &str) -> ScaleResult<Self> {
        let parts: Vec<&str> = point_str.split(',').collect();
        if parts.len() != 2 {
            return Err(ScaleError::GenericError(
                "Point must be in format 'x,y'".to_string()));
        }

        let x = parts[0].trim().parse::<f64>()
            .map_err(|_| ScaleError::GenericError(format!("Invalid x coordinate: {}", parts[0])))?;
        let y = parts[1].trim().parse::<f64>()
            .map_err(|_| ScaleError::GenericError(format!("Invalid y coordinate: {}", parts[1])))?;

        Ok(Point::new(x, y))
    }

    /// Both ordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
