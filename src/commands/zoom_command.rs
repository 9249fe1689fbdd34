//! Zoom-to-point command
//!
//! Computes the extent a viewport shows when centered on a point at a scale.

use clap::ArgMatches;
use log::info;

use crate::api::ScaleKit;
use crate::commands::command_traits::Command;
use crate::coordinate::{DeviceViewport, Envelope, Point};
use crate::errors::ScaleResult;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

/// Command for the view extent around a point
pub struct ZoomCommand<'a> {
    crs: String,
    center: Point,
    scale: f64,
    viewport: DeviceViewport,
    kit: &'a ScaleKit,
    logger: &'a Logger,
}

impl<'a> ZoomCommand<'a> {
    /// Create a new zoom command
    pub fn new(args: &ArgMatches, kit: &'a ScaleKit, logger: &'a Logger) -> ScaleResult<Self> {
        Ok(ZoomCommand {
            crs: arg_utils::required_str(args, "crs")?.to_string(),
            center: arg_utils::required_point(args, "center")?,
            scale: arg_utils::required_f64(args, "scale")?,
            viewport: arg_utils::viewport(args, kit.config().default_dpi)?,
            kit,
            logger,
        })
    }

    /// The view extent
    pub fn compute(&self) -> ScaleResult<Envelope> {
        self.kit.envelope_at_scale(&self.crs, &self.center, self.scale, &self.viewport)
    }
}

impl<'a> Command for ZoomCommand<'a> {
    fn run(&self) -> ScaleResult<String> {
        info!("Zooming to {:?} in {} at 1:{}", self.center, self.crs, self.scale);

        let env = self.compute()?;
        let output = format!("{},{},{},{}", env.min_x, env.min_y, env.max_x, env.max_y);
        self.logger.log(&format!("zoom {} 1:{} -> {}", self.crs, self.scale, output))?;
        Ok(output)
    }
}
