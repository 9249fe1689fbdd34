//! Coordinate system definitions
//!
//! Definitions are opaque to the engine. The only thing it ever asks of one
//! is whether it names the flat local meter plane, which needs no transform.

use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;

/// WKT of the non-earth, meter-unit Cartesian plane used as the local frame
pub const LOCAL_METERS_WKT: &str = "LOCAL_CS[\"Non-Earth (Meter)\",LOCAL_DATUM[\"Local Datum\",0],UNIT[\"Meter\", 1],AXIS[\"X\",EAST],AXIS[\"Y\",NORTH]]";

/// Short code accepted in place of the local meter WKT
pub const LOCAL_METERS_CODE: &str = "XY-M";

lazy_static! {
    static ref LOCAL_METERS_PATTERN: Regex = Regex::new(
        r#"^LOCAL_CS\["[^"]*",LOCAL_DATUM\["[^"]*",\d+\],UNIT\["METERS?",1(\.0+)?\](,AXIS\["X",EAST\],AXIS\["Y",NORTH\])?\]$"#
    ).unwrap_or_else(|e| panic!("invalid local CS pattern: {}", e));
}

/// An externally resolved coordinate reference system identifier or WKT
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoordinateSystemDefinition(String);

impl CoordinateSystemDefinition {
    /// Wrap a definition string as given
    pub fn new(definition: impl Into<String>) -> Self {
        CoordinateSystemDefinition(definition.into())
    }

    /// The flat local meter plane
    pub fn local_meters() -> Self {
        CoordinateSystemDefinition(LOCAL_METERS_WKT.to_string())
    }

    /// The definition text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased text with all whitespace removed, used for lookups
    pub fn normalized(&self) -> String {
        self.0.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase()
    }

    /// Whether this names a non-earth Cartesian plane measured in meters
    pub fn is_local_meters(&self) -> bool {
        let norm = self.normalized();
        norm == LOCAL_METERS_CODE || LOCAL_METERS_PATTERN.is_match(&norm)
    }
}

impl fmt::Display for CoordinateSystemDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoordinateSystemDefinition {
    fn from(s: &str) -> Self {
        CoordinateSystemDefinition::new(s)
    }
}
