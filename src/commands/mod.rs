//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod scale_command;
pub mod adjust_command;
pub mod distance_command;
pub mod zoom_command;

pub use command_traits::{Command, CommandFactory};
pub use scale_command::ScaleCommand;
pub use adjust_command::AdjustCommand;
pub use distance_command::DistanceCommand;
pub use zoom_command::ZoomCommand;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use crate::api::ScaleKit;
use crate::errors::{ScaleError, ScaleResult};
use crate::utils::logger::Logger;

fn crs_arg() -> Arg {
    Arg::new("crs")
        .long("crs")
        .help("Coordinate system code or WKT (e.g. EPSG:4326, XY-FT)")
        .value_name("DEF")
        .required(true)
}

fn size_args() -> [Arg; 2] {
    [
        Arg::new("size")
            .long("size")
            .help("Viewport size in pixels")
            .value_name("WxH")
            .required(true),
        Arg::new("dpi")
            .long("dpi")
            .help("Viewport resolution (defaults to the configured DPI)")
            .value_name("DPI")
            .required(false),
    ]
}

fn coordinate_arg(name: &'static str, help: &'static str, value_name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_name(value_name)
        .allow_hyphen_values(true)
        .required(true)
}

/// The command line interface definition
pub fn cli() -> ClapCommand {
    ClapCommand::new("ScaleKit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Map scale, extent and ground distance calculations in any coordinate system")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Engine configuration file (TOML)")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write the run log to this file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            ClapCommand::new("scale")
                .about("Scale at which a bounding box fits the viewport")
                .arg(crs_arg())
                .arg(coordinate_arg("bbox", "Bounding box (minx,miny,maxx,maxy)", "BBOX"))
                .args(size_args())
                .arg(
                    Arg::new("max-scale")
                        .long("max-scale")
                        .help("Largest layer scale; caps the result just below it")
                        .value_name("SCALE")
                        .required(false),
                ),
        )
        .subcommand(
            ClapCommand::new("adjust")
                .about("Resize a bounding box around its center to a scale")
                .arg(crs_arg())
                .arg(coordinate_arg("bbox", "Bounding box (minx,miny,maxx,maxy)", "BBOX"))
                .arg(Arg::new("scale").long("scale").help("Target scale denominator").value_name("SCALE").required(true))
                .args(size_args()),
        )
        .subcommand(
            ClapCommand::new("distance")
                .about("Ground distance between two points in meters")
                .arg(crs_arg())
                .arg(coordinate_arg("from", "First point (x,y)", "X,Y"))
                .arg(coordinate_arg("to", "Second point (x,y)", "X,Y")),
        )
        .subcommand(
            ClapCommand::new("zoom")
                .about("View extent centered on a point at a scale")
                .arg(crs_arg())
                .arg(coordinate_arg("center", "Center point (x,y)", "X,Y"))
                .arg(Arg::new("scale").long("scale").help("Target scale denominator").value_name("SCALE").required(true))
                .args(size_args()),
        )
}

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the sub-command given on the command line and
/// creates the matching command instance for execution.
pub struct ScalekitCommandFactory;

impl ScalekitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ScalekitCommandFactory
    }
}

impl Default for ScalekitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for ScalekitCommandFactory {
    fn create_command(&self, args: &ArgMatches, kit: &'a ScaleKit, logger: &'a Logger) -> ScaleResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("scale", sub)) => Ok(Box::new(ScaleCommand::new(sub, kit, logger)?)),
            Some(("adjust", sub)) => Ok(Box::new(AdjustCommand::new(sub, kit, logger)?)),
            Some(("distance", sub)) => Ok(Box::new(DistanceCommand::new(sub, kit, logger)?)),
            Some(("zoom", sub)) => Ok(Box::new(ZoomCommand::new(sub, kit, logger)?)),
            Some((other, _)) => Err(ScaleError::GenericError(format!("Unknown command: {}", other))),
            None => Err(ScaleError::GenericError("No command given".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(argv: &[&str]) -> ScaleResult<String> {
        let matches = cli().try_get_matches_from(argv)
            .map_err(|e| ScaleError::GenericError(e.to_string()))?;
        let kit = ScaleKit::new()?;
        let logger = Logger::disabled();
        let command = ScalekitCommandFactory::new().create_command(&matches, &kit, &logger)?;
        command.run()
    }

    #[test]
    fn test_scale_command() {
        let out = run(&["scalekit", "scale", "--crs", "XY-M", "--bbox", "0,0,1000,500", "--size", "200x100"]).unwrap();
        assert_eq!(out, "1:18897.64");
    }

    #[test]
    fn test_scale_command_with_layer_cap() {
        let out = run(&["scalekit", "scale", "--crs", "XY-M", "--bbox", "0,0,1000,500",
                        "--size", "100x100", "--max-scale", "10000"]).unwrap();
        assert_eq!(out, "1:9999.00");
    }

    #[test]
    fn test_adjust_command_keeps_center() {
        let out = run(&["scalekit", "adjust", "--crs", "XY-M", "--bbox", "-500,-250,500,250",
                        "--scale", "18897.6377952756", "--size", "200x100"]).unwrap();
        let values: Vec<f64> = out.split(',').map(|v| v.parse().unwrap()).collect();
        assert!((values[0] + 500.0).abs() < 1e-6);
        assert!((values[3] - 250.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_command_feet() {
        let out = run(&["scalekit", "distance", "--crs", "XY-IFT", "--from", "0,0", "--to", "-3,-4"]).unwrap();
        assert_eq!(out, "1.524 m");
    }

    #[test]
    fn test_zoom_command_dpi_override() {
        let out = run(&["scalekit", "zoom", "--crs", "XY-M", "--center", "0,0", "--scale", "1000",
                        "--size", "254x254", "--dpi", "254"]).unwrap();
        let values: Vec<f64> = out.split(',').map(|v| v.parse().unwrap()).collect();
        // 254 px at 254 dpi is one inch, 25.4 m at 1:1000
        assert!((values[2] - values[0] - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_errors_surface() {
        let err = run(&["scalekit", "scale", "--crs", "XY-M", "--bbox", "5,0,5,10", "--size", "100x100"]).unwrap_err();
        assert!(matches!(err, ScaleError::InvalidExtent(_)));

        let err = run(&["scalekit", "distance", "--crs", "EPSG:000", "--from", "0,0", "--to", "1,1"]).unwrap_err();
        assert!(matches!(err, ScaleError::UnsupportedCoordinateSystem(_)));

        assert!(run(&["scalekit", "scale", "--crs", "XY-M", "--bbox", "0,0,1", "--size", "1x1"]).is_err());
    }
}
