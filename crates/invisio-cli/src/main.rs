use std::process::ExitCode;

use clap::Parser;
use invisio_core::{CodecOptions, InvisioError};

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, InvisioError>;

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> CliResult<()> {
    let options = CodecOptions::default()
        .with_bits_per_channel(args.bits_per_channel)
        .with_alpha_channel(args.use_alpha);

    match args.command {
        Commands::Hide(hide) => hide.run(options),
        Commands::Unveil(unveil) => unveil.run(),
        Commands::Capacity(capacity) => capacity.run(options),
    }
}
