use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Unveils hidden files from PNG or BMP images
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Password used to encrypt the data, asked for interactively if missing
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Source image that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,

    /// Final data will be stored in that folder
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output folder",
        required = true
    )]
    pub output_folder: PathBuf,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let password = if self.password.is_none() {
            crate::cli::ask_for_password(false)
        } else {
            self.password
        };

        let files = invisio_core::commands::unveil(&self.media, &self.output_folder, password)?;
        for file in files {
            println!("{}", file.display());
        }

        Ok(())
    }
}
