//! Helpers for pulling typed values out of CLI arguments

use clap::ArgMatches;
use crate::coordinate::{DeviceViewport, Envelope, Point};
use crate::errors::{ScaleError, ScaleResult};

/// A required string argument
pub fn required_str<'m>(args: &'m ArgMatches, name: &str) -> ScaleResult<&'m str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| ScaleError::GenericError(format!("Missing required argument --{}", name)))
}

/// A required floating point argument
pub fn required_f64(args: &ArgMatches, name: &str) -> ScaleResult<f64> {
    let raw = required_str(args, name)?;
    raw.trim().parse::<f64>()
        .map_err(|_| ScaleError::GenericError(format!("Invalid number for --{}: {}", name, raw)))
}

/// An optional floating point argument
pub fn optional_f64(args: &ArgMatches, name: &str) -> ScaleResult<Option<f64>> {
    match args.get_one::<String>(name) {
        Some(_) => required_f64(args, name).map(Some),
        None => Ok(None),
    }
}

/// A required "x,y" point argument
pub fn required_point(args: &ArgMatches, name: &str) -> ScaleResult<Point> {
    Point::from_string(required_str(args, name)?)
}

/// A required "minx,miny,maxx,maxy" envelope argument
pub fn required_envelope(args: &ArgMatches, name: &str) -> ScaleResult<Envelope> {
    Envelope::from_string(required_str(args, name)?)
}

/// Viewport from `--size WxH` and an optional `--dpi`
pub fn viewport(args: &ArgMatches, default_dpi: f64) -> ScaleResult<DeviceViewport> {
    let dpi = optional_f64(args, "dpi")?.unwrap_or(default_dpi);
    DeviceViewport::from_size_string(required_str(args, "size")?, dpi)
}
