use std::path::PathBuf;

use clap::Args;
use invisio_core::{Carrier, CodecOptions};

use crate::CliResult;

/// Shows how many bytes an image can hide
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image (PNG, BMP or JPEG)
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let carrier = Carrier::from_file(&self.media)?;
        let capacity = carrier.capacity(&options);

        println!(
            "{} bytes available ({}x{} pixels, {} channels, {} bits per channel)",
            capacity.available_bytes(),
            capacity.width,
            capacity.height,
            capacity.channels_per_pixel,
            capacity.bits_per_channel
        );
        log::debug!("{} bits available in total", capacity.available_bits());

        Ok(())
    }
}
