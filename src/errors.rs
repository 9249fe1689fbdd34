//! Custom error types for scale and extent calculations

use std::fmt;
use std::io;

/// Errors raised by the scale engine and its collaborators
#[derive(Debug)]
pub enum ScaleError {
    /// Degenerate envelope, viewport or scale passed to a calculation
    InvalidExtent(String),
    /// A transform could not be built for a coordinate system definition
    UnsupportedCoordinateSystem(String),
    /// A forward or inverse transform fell outside its domain of validity
    TransformFailure(String),
    /// I/O error
    IoError(io::Error),
    /// Invalid configuration or catalog content
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleError::InvalidExtent(msg) => write!(f, "Invalid extent: {}", msg),
            ScaleError::UnsupportedCoordinateSystem(msg) => write!(f, "Unsupported coordinate system: {}", msg),
            ScaleError::TransformFailure(msg) => write!(f, "Transform failed: {}", msg),
            ScaleError::IoError(e) => write!(f, "I/O error: {}", e),
            ScaleError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ScaleError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ScaleError {
    fn from(error: io::Error) -> Self {
        ScaleError::IoError(error)
    }
}

impl From<String> for ScaleError {
    fn from(msg: String) -> Self {
        ScaleError::GenericError(msg)
    }
}

/// Result type for scale engine operations
pub type ScaleResult<T> = Result<T, ScaleError>;
