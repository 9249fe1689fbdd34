//! Engine configuration
//!
//! Read from a TOML file:
//!
//! ```toml
//! [engine]
//! default_dpi = 96.0
//!
//! [catalog]
//! path = "site_coordinate_systems.toml"
//! ```
//!
//! Every key is optional and unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::coordinate::DEFAULT_DPI;
use crate::errors::{ScaleError, ScaleResult};
use crate::transform::{BuiltinTransformProvider, CoordinateSystemCatalog};

/// Settings for the scale engine and its built-in provider
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// DPI assumed when a caller gives none
    pub default_dpi: f64,
    /// Extra catalog merged over the built-in one
    pub catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_dpi: DEFAULT_DPI,
            catalog_path: None,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a TOML string
    pub fn from_str(content: &str) -> ScaleResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| ScaleError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = EngineConfig::default();

        if let Some(engine) = toml_value.get("engine").and_then(|v| v.as_table()) {
            if let Some(dpi) = engine.get("default_dpi") {
                let dpi = dpi.as_float()
                    .or_else(|| dpi.as_integer().map(|i| i as f64))
                    .ok_or_else(|| ScaleError::ConfigError("engine.default_dpi must be a number".to_string()))?;
                if !(dpi.is_finite() && dpi > 0.0) {
                    return Err(ScaleError::ConfigError(format!("engine.default_dpi must be positive, got {}", dpi)));
                }
                config.default_dpi = dpi;
            }
        }

        if let Some(catalog) = toml_value.get("catalog").and_then(|v| v.as_table()) {
            if let Some(path) = catalog.get("path") {
                let path = path.as_str()
                    .ok_or_else(|| ScaleError::ConfigError("catalog.path must be a string".to_string()))?;
                config.catalog_path = Some(PathBuf::from(path));
            }
        }

        Ok(config)
    }

    /// Load a configuration file
    ///
    /// A relative `catalog.path` is resolved against the file's directory.
    pub fn from_file(path: &str) -> ScaleResult<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_str(&contents)?;

        if let (Some(catalog), Some(dir)) = (&config.catalog_path, Path::new(path).parent()) {
            if catalog.is_relative() {
                config.catalog_path = Some(dir.join(catalog));
            }
        }

        info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// The built-in catalog extended with the configured one, if any
    pub fn catalog(&self) -> ScaleResult<CoordinateSystemCatalog> {
        let mut catalog = CoordinateSystemCatalog::builtin().clone();
        if let Some(path) = &self.catalog_path {
            let path_str = path.to_str().ok_or_else(|| ScaleError::ConfigError(
                format!("Catalog path is not valid UTF-8: {}", path.display())
            ))?;
            let extra = CoordinateSystemCatalog::from_file(path_str)?;
            debug!("Merging {} catalog entries from {}", extra.len(), path.display());
            catalog.extend(extra);
        }
        Ok(catalog)
    }

    /// A built-in provider over [`EngineConfig::catalog`]
    pub fn provider(&self) -> ScaleResult<BuiltinTransformProvider> {
        Ok(BuiltinTransformProvider::new(self.catalog()?))
    }
}
