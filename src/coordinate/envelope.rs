//! Envelope structure for axis-aligned extents

use super::point::Point;
use crate::errors::{ScaleError, ScaleResult};

/// An axis-aligned bounding box in the units of a single coordinate system
///
/// The constructors keep `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl Envelope {
    /// Create a new envelope, ordering each axis so min never exceeds max
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Envelope {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Create an envelope of the given size around a center point
    pub fn from_center(center: &Point, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Envelope::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// Smallest envelope containing every point
    ///
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut env = Envelope::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            env.min_x = env.min_x.min(p.x);
            env.min_y = env.min_y.min(p.y);
            env.max_x = env.max_x.max(p.x);
            env.max_y = env.max_y.max(p.y);
        }
        Some(env)
    }

    /// Parse an envelope from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str) -> ScaleResult<Self> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(ScaleError::GenericError(
                "Bounding box must have 4 comma-separated values".to_string()));
        }

        let mut values = [0.0; 4];
        for (slot, (part, name)) in values.iter_mut()
            .zip(parts.iter().zip(["min_x", "min_y", "max_x", "max_y"]))
        {
            *slot = part.trim().parse::<f64>()
                .map_err(|_| ScaleError::GenericError(format!("Invalid {} value: {}", name, part.trim())))?;
        }

        Ok(Envelope::new(values[0], values[1], values[2], values[3]))
    }

    /// Get the width of the envelope
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the envelope
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Get the center point of the envelope
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// The four corners, counter-clockwise from (min_x, min_y)
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Check if this envelope contains a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x &&
            point.y >= self.min_y && point.y <= self.max_y
    }

    /// True when either side has no positive, finite length
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_axes() {
        let env = Envelope::new(10.0, 5.0, 0.0, -5.0);
        assert_eq!(env, Envelope::new(0.0, -5.0, 10.0, 5.0));
        assert_eq!(env.width(), 10.0);
        assert_eq!(env.height(), 10.0);
    }

    #[test]
    fn test_center_and_corners() {
        let env = Envelope::new(0.0, 0.0, 1000.0, 500.0);
        assert_eq!(env.center(), Point::new(500.0, 250.0));

        let corners = env.corners();
        assert_eq!(corners[0], Point::new(0.0, 0.0));
        assert_eq!(corners[2], Point::new(1000.0, 500.0));
        assert_eq!(Envelope::from_points(&corners), Some(env));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(Envelope::from_points(&[]).is_none());
    }

    #[test]
    fn test_from_center() {
        let env = Envelope::from_center(&Point::new(10.0, 20.0), 4.0, 2.0);
        assert_eq!(env, Envelope::new(8.0, 19.0, 12.0, 21.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Envelope::new(1.0, 0.0, 1.0, 5.0).is_degenerate());
        assert!(Envelope::new(0.0, 2.0, 5.0, 2.0).is_degenerate());
        assert!(Envelope::new(0.0, 0.0, f64::INFINITY, 1.0).is_degenerate());
        assert!(!Envelope::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_parse_envelope() {
        let env = Envelope::from_string("-125.5, 24.75, -66.25, 50.125").unwrap();
        assert_eq!(env.min_x, -125.5);
        assert_eq!(env.max_y, 50.125);

        assert!(Envelope::from_string("1,2,3").is_err());
        assert!(Envelope::from_string("1,2,x,4").is_err());
    }
}
