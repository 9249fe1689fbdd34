//! Coordinate value types
//!
//! This module provides the value objects the scale engine works with:
//! points and envelopes in a single coordinate system's units, the device
//! viewport they are rendered onto, and opaque coordinate system definitions.

mod envelope;
mod point;
mod viewport;
mod definition;

// Re-export key types
pub use self::envelope::Envelope;
pub use self::point::Point;
pub use self::viewport::{DeviceViewport, DEFAULT_DPI, METERS_PER_INCH};
pub use self::definition::{CoordinateSystemDefinition, LOCAL_METERS_CODE, LOCAL_METERS_WKT};
