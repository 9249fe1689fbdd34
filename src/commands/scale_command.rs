//! Scale calculation command
//!
//! Computes the scale at which a bounding box fits a viewport, optionally
//! capped by a layer's maximum visible scale.

use clap::ArgMatches;
use log::info;

use crate::api::ScaleKit;
use crate::commands::command_traits::Command;
use crate::coordinate::{DeviceViewport, Envelope};
use crate::errors::ScaleResult;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

/// Command for computing the scale of an extent
pub struct ScaleCommand<'a> {
    /// Coordinate system of the bounding box
    crs: String,
    /// Extent to fit
    envelope: Envelope,
    /// Rendering surface
    viewport: DeviceViewport,
    /// Largest scale at which any layer is visible
    max_layer_scale: Option<f64>,
    kit: &'a ScaleKit,
    logger: &'a Logger,
}

impl<'a> ScaleCommand<'a> {
    /// Create a new scale command
    ///
    /// # Arguments
    /// * `args` - Sub-command argument matches from clap
    /// * `kit` - Engine facade
    /// * `logger` - Logger for recording results
    pub fn new(args: &ArgMatches, kit: &'a ScaleKit, logger: &'a Logger) -> ScaleResult<Self> {
        Ok(ScaleCommand {
            crs: arg_utils::required_str(args, "crs")?.to_string(),
            envelope: arg_utils::required_envelope(args, "bbox")?,
            viewport: arg_utils::viewport(args, kit.config().default_dpi)?,
            max_layer_scale: arg_utils::optional_f64(args, "max-scale")?,
            kit,
            logger,
        })
    }

    /// The computed scale denominator
    pub fn compute(&self) -> ScaleResult<f64> {
        match self.max_layer_scale {
            Some(_) => self.kit.initial_view_scale(&self.crs, &self.envelope, &self.viewport, self.max_layer_scale),
            None => self.kit.calculate_scale(&self.crs, &self.envelope, &self.viewport),
        }
    }
}

impl<'a> Command for ScaleCommand<'a> {
    fn run(&self) -> ScaleResult<String> {
        info!("Calculating scale of {:?} in {} for {}x{} px @ {} dpi",
              self.envelope, self.crs,
              self.viewport.width_pixels, self.viewport.height_pixels, self.viewport.dpi);

        let scale = self.compute()?;
        let output = format!("1:{:.2}", scale);
        self.logger.log(&format!("scale {} -> {}", self.crs, output))?;
        Ok(output)
    }
}
