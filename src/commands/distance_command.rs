//! Ground distance command

use clap::ArgMatches;
use log::info;

use crate::api::ScaleKit;
use crate::commands::command_traits::Command;
use crate::coordinate::Point;
use crate::errors::ScaleResult;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

/// Command for measuring the ground distance between two points
pub struct DistanceCommand<'a> {
    crs: String,
    from: Point,
    to: Point,
    kit: &'a ScaleKit,
    logger: &'a Logger,
}

impl<'a> DistanceCommand<'a> {
    /// Create a new distance command
    pub fn new(args: &ArgMatches, kit: &'a ScaleKit, logger: &'a Logger) -> ScaleResult<Self> {
        Ok(DistanceCommand {
            crs: arg_utils::required_str(args, "crs")?.to_string(),
            from: arg_utils::required_point(args, "from")?,
            to: arg_utils::required_point(args, "to")?,
            kit,
            logger,
        })
    }

    /// Distance in meters
    pub fn compute(&self) -> ScaleResult<f64> {
        self.kit.distance_in_meters(&self.crs, &self.from, &self.to)
    }
}

impl<'a> Command for DistanceCommand<'a> {
    fn run(&self) -> ScaleResult<String> {
        info!("Measuring {:?} -> {:?} in {}", self.from, self.to, self.crs);

        let meters = self.compute()?;
        let output = format!("{:.3} m", meters);
        self.logger.log(&format!("distance {} -> {}", self.crs, output))?;
        Ok(output)
    }
}
