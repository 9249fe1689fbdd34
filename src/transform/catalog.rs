//! Catalog of coordinate systems known to the built-in provider
//!
//! The catalog is a TOML document with one `[[coordinate_system]]` table per
//! entry. The built-in copy is compiled into the binary; callers may extend it
//! with a file of their own.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use lazy_static::lazy_static;
use log::{debug, warn};
use crate::coordinate::CoordinateSystemDefinition;
use crate::errors::{ScaleError, ScaleResult};
use super::spherical::EARTH_RADIUS;

lazy_static! {
    // Parse the embedded catalog once
    static ref BUILTIN_CATALOG: Arc<CoordinateSystemCatalog> = {
        let content = include_str!("../../coordinate_systems.toml");
        Arc::new(CoordinateSystemCatalog::from_str(content).unwrap_or_else(|e| {
            warn!("Failed to parse built-in coordinate system catalog: {}", e);
            CoordinateSystemCatalog::default()
        }))
    };
}

/// How a catalogued coordinate system maps onto local meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateSystemKind {
    /// Flat plane whose axis units are `meters_per_unit` meters
    Linear { meters_per_unit: f64 },
    /// Longitude/latitude in degrees on a sphere
    Geographic { radius: f64 },
    /// Spherical Web Mercator meters
    WebMercator { radius: f64 },
}

/// A single catalogued coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Primary code, e.g. "EPSG:4326"
    pub code: String,
    /// Human readable name
    pub name: String,
    /// Alternative codes resolving to this entry
    pub aliases: Vec<String>,
    /// Mapping onto local meters
    pub kind: CoordinateSystemKind,
}

impl CatalogEntry {
    /// Whether the entry is a flat plane measured directly in meters
    pub fn is_meter_cartesian(&self) -> bool {
        matches!(self.kind, CoordinateSystemKind::Linear { meters_per_unit } if meters_per_unit == 1.0)
    }
}

/// Lookup table of coordinate systems keyed by normalized code and alias
#[derive(Debug, Clone, Default)]
pub struct CoordinateSystemCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl CoordinateSystemCatalog {
    /// The catalog compiled into the crate
    pub fn builtin() -> &'static CoordinateSystemCatalog {
        &**BUILTIN_CATALOG
    }

    /// A shared handle to the built-in catalog
    pub fn shared_builtin() -> Arc<CoordinateSystemCatalog> {
        Arc::clone(&*BUILTIN_CATALOG)
    }

    /// Parse a catalog from a TOML string
    pub fn from_str(content: &str) -> ScaleResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| ScaleError::ConfigError(format!("Failed to parse catalog TOML: {}", e)))?;

        let mut catalog = CoordinateSystemCatalog::default();
        let Some(tables) = toml_value.get("coordinate_system").and_then(|v| v.as_array()) else {
            return Ok(catalog);
        };

        for table in tables {
            catalog.insert(Self::parse_entry(table)?);
        }

        debug!("Loaded {} coordinate system catalog entries", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &str) -> ScaleResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    fn parse_entry(table: &toml::Value) -> ScaleResult<CatalogEntry> {
        let code = table.get("code").and_then(|v| v.as_str())
            .ok_or_else(|| ScaleError::ConfigError("Catalog entry without a code".to_string()))?;
        let name = table.get("name").and_then(|v| v.as_str()).unwrap_or(code);
        let kind_name = table.get("kind").and_then(|v| v.as_str())
            .ok_or_else(|| ScaleError::ConfigError(format!("Catalog entry {} has no kind", code)))?;

        let positive = |key: &str, default: Option<f64>| -> ScaleResult<f64> {
            let value = table.get(key)
                .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
                .or(default)
                .ok_or_else(|| ScaleError::ConfigError(format!("Catalog entry {} is missing {}", code, key)))?;
            if value.is_finite() && value > 0.0 {
                Ok(value)
            } else {
                Err(ScaleError::ConfigError(format!("Catalog entry {}: {} must be positive", code, key)))
            }
        };

        let kind = match kind_name {
            "linear" => CoordinateSystemKind::Linear { meters_per_unit: positive("meters_per_unit", None)? },
            "geographic" => CoordinateSystemKind::Geographic { radius: positive("radius", Some(EARTH_RADIUS))? },
            "web_mercator" => CoordinateSystemKind::WebMercator { radius: positive("radius", Some(EARTH_RADIUS))? },
            other => return Err(ScaleError::ConfigError(format!(
                "Catalog entry {} has unknown kind '{}'", code, other
            ))),
        };

        let aliases = table.get("aliases")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|a| a.as_str()).map(str::to_string).collect())
            .unwrap_or_default();

        Ok(CatalogEntry {
            code: code.to_string(),
            name: name.to_string(),
            aliases,
            kind,
        })
    }

    /// Add an entry, replacing any existing entry with the same code or alias
    pub fn insert(&mut self, entry: CatalogEntry) {
        let keys: Vec<String> = std::iter::once(&entry.code)
            .chain(entry.aliases.iter())
            .map(|k| CoordinateSystemDefinition::new(k.as_str()).normalized())
            .collect();

        let slot = keys.iter()
            .find_map(|k| self.index.get(k).copied())
            .unwrap_or(self.entries.len());
        if slot == self.entries.len() {
            self.entries.push(entry);
        } else {
            self.entries[slot] = entry;
        }

        for key in keys {
            self.index.insert(key, slot);
        }
    }

    /// Add every entry of `other`, letting it win on conflicts
    pub fn extend(&mut self, other: CoordinateSystemCatalog) {
        for entry in other.entries {
            self.insert(entry);
        }
    }

    /// Find the entry for a definition by code or alias
    ///
    /// A bare number is treated as an EPSG code.
    pub fn lookup(&self, definition: &CoordinateSystemDefinition) -> Option<&CatalogEntry> {
        let key = definition.normalized();
        let idx = self.index.get(&key).copied().or_else(|| {
            key.parse::<u32>().ok()
                .and_then(|epsg| self.index.get(&format!("EPSG:{}", epsg)).copied())
        })?;
        self.entries.get(idx)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = CoordinateSystemCatalog::builtin();
        assert!(!catalog.is_empty());

        let wgs84 = catalog.lookup(&"EPSG:4326".into()).unwrap();
        assert_eq!(wgs84.name, "WGS 84");
        assert!(matches!(wgs84.kind, CoordinateSystemKind::Geographic { .. }));
    }

    #[test]
    fn test_lookup_by_alias_and_bare_number() {
        let catalog = CoordinateSystemCatalog::builtin();
        assert_eq!(catalog.lookup(&"crs:84".into()).unwrap().code, "EPSG:4326");
        assert_eq!(catalog.lookup(&"3857".into()).unwrap().code, "EPSG:3857");
        assert_eq!(catalog.lookup(&"epsg:900913".into()).unwrap().code, "EPSG:3857");
        assert!(catalog.lookup(&"EPSG:99999".into()).is_none());
    }

    #[test]
    fn test_meter_cartesian_entries() {
        let catalog = CoordinateSystemCatalog::builtin();
        assert!(catalog.lookup(&"XY-M".into()).unwrap().is_meter_cartesian());
        assert!(catalog.lookup(&"EPSG:27700".into()).unwrap().is_meter_cartesian());
        assert!(!catalog.lookup(&"XY-FT".into()).unwrap().is_meter_cartesian());
        assert!(!catalog.lookup(&"EPSG:3857".into()).unwrap().is_meter_cartesian());
    }

    #[test]
    fn test_extend_overrides_existing_code() {
        let mut catalog = CoordinateSystemCatalog::builtin().clone();
        let before = catalog.len();

        let extra = CoordinateSystemCatalog::from_str(r#"
            [[coordinate_system]]
            code = "XY-FT"
            name = "Plant grid feet"
            kind = "linear"
            meters_per_unit = 0.3048

            [[coordinate_system]]
            code = "LOCAL:PLANT"
            kind = "linear"
            meters_per_unit = 2
        "#).unwrap();
        catalog.extend(extra);

        assert_eq!(catalog.len(), before + 1);
        let ft = catalog.lookup(&"XY-FT".into()).unwrap();
        assert_eq!(ft.name, "Plant grid feet");
        assert_eq!(ft.kind, CoordinateSystemKind::Linear { meters_per_unit: 0.3048 });
        assert_eq!(
            catalog.lookup(&"local:plant".into()).unwrap().kind,
            CoordinateSystemKind::Linear { meters_per_unit: 2.0 }
        );
    }

    #[test]
    fn test_invalid_entries_rejected() {
        let bad_kind = "[[coordinate_system]]\ncode = \"A\"\nkind = \"conic\"\n";
        assert!(matches!(CoordinateSystemCatalog::from_str(bad_kind), Err(ScaleError::ConfigError(_))));

        let bad_unit = "[[coordinate_system]]\ncode = \"A\"\nkind = \"linear\"\nmeters_per_unit = 0.0\n";
        assert!(CoordinateSystemCatalog::from_str(bad_unit).is_err());

        assert!(CoordinateSystemCatalog::from_str("not = [valid").is_err());
    }

    #[test]
    fn test_radius_defaults_to_earth() {
        let catalog = CoordinateSystemCatalog::from_str(
            "[[coordinate_system]]\ncode = \"SITE:LL\"\nkind = \"geographic\"\n\n\
             [[coordinate_system]]\ncode = \"MARS:LL\"\nkind = \"geographic\"\nradius = 3396190\n"
        ).unwrap();
        assert_eq!(
            catalog.lookup(&"SITE:LL".into()).unwrap().kind,
            CoordinateSystemKind::Geographic { radius: EARTH_RADIUS }
        );
        assert_eq!(
            catalog.lookup(&"MARS:LL".into()).unwrap().kind,
            CoordinateSystemKind::Geographic { radius: 3396190.0 }
        );

        // a missing unit size is still an error
        let no_unit = "[[coordinate_system]]\ncode = \"A\"\nkind = \"linear\"\n";
        assert!(matches!(CoordinateSystemCatalog::from_str(no_unit), Err(ScaleError::ConfigError(_))));
    }

    #[test]
    fn test_empty_document_is_empty_catalog() {
        assert!(CoordinateSystemCatalog::from_str("").unwrap().is_empty());
    }
}
