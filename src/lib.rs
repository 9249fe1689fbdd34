pub mod errors;
pub mod coordinate;
pub mod transform;
pub mod engine;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::ScaleKit;
pub use crate::config::EngineConfig;
pub use crate::errors::{ScaleError, ScaleResult};

pub use coordinate::{CoordinateSystemDefinition, DeviceViewport, Envelope, Point};
pub use engine::{CoordinateSystem, MeterBasedCoordinateSystem, ProjectedCoordinateSystem, ScaleCalculator};
pub use transform::{BuiltinTransformProvider, PointTransform, TransformProvider};
