//! Zoom-to-scale command
//!
//! Re-sizes a bounding box around its center so that a viewport shows it at
//! a requested scale.

use clap::ArgMatches;
use log::info;

use crate::api::ScaleKit;
use crate::commands::command_traits::Command;
use crate::coordinate::{DeviceViewport, Envelope};
use crate::errors::ScaleResult;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

/// Command for adjusting an extent to a scale
pub struct AdjustCommand<'a> {
    crs: String,
    envelope: Envelope,
    scale: f64,
    viewport: DeviceViewport,
    kit: &'a ScaleKit,
    logger: &'a Logger,
}

impl<'a> AdjustCommand<'a> {
    /// Create a new adjust command
    pub fn new(args: &ArgMatches, kit: &'a ScaleKit, logger: &'a Logger) -> ScaleResult<Self> {
        Ok(AdjustCommand {
            crs: arg_utils::required_str(args, "crs")?.to_string(),
            envelope: arg_utils::required_envelope(args, "bbox")?,
            scale: arg_utils::required_f64(args, "scale")?,
            viewport: arg_utils::viewport(args, kit.config().default_dpi)?,
            kit,
            logger,
        })
    }

    /// The adjusted extent
    pub fn compute(&self) -> ScaleResult<Envelope> {
        self.kit.adjust_bounding_box(&self.crs, &self.envelope, self.scale, &self.viewport)
    }
}

impl<'a> Command for AdjustCommand<'a> {
    fn run(&self) -> ScaleResult<String> {
        info!("Adjusting {:?} in {} to 1:{}", self.envelope, self.crs, self.scale);

        let env = self.compute()?;
        let output = format!("{},{},{},{}", env.min_x, env.min_y, env.max_x, env.max_y);
        self.logger.log(&format!("adjust {} 1:{} -> {}", self.crs, self.scale, output))?;
        Ok(output)
    }
}
