use clap::{Parser, Subcommand};
use dialoguer::Password;
use invisio_core::BitDepth;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Experimental: number of lowest bits per color channel that carry data (1, 2 or 4)
    #[arg(
        long = "x-bits-per-channel",
        default_value = "1",
        value_parser = parse_bit_depth,
        global = true
    )]
    pub bits_per_channel: BitDepth,

    /// Experimental: hide data in the alpha channel too
    #[arg(long = "x-use-alpha", global = true)]
    pub use_alpha: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

fn parse_bit_depth(value: &str) -> Result<BitDepth, String> {
    let bits: u8 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    BitDepth::try_from(bits)
}

/// asks for a password on the terminal, an empty answer means no encryption
pub fn ask_for_password(confirm: bool) -> Option<String> {
    let prompt = Password::new()
        .with_prompt("Password (leave empty for none)")
        .allow_empty_password(true);
    let prompt = if confirm {
        prompt.with_confirmation("Repeat password", "Passwords do not match")
    } else {
        prompt
    };

    match prompt.interact() {
        Ok(password) if !password.is_empty() => Some(password),
        Ok(_) => None,
        Err(e) => {
            log::warn!("cannot ask for a password, continuing without: {e}");
            None
        }
    }
}
