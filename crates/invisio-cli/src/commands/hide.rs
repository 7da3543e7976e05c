use std::path::PathBuf;

use clap::Args;
use invisio_core::CodecOptions;

use crate::CliResult;

/// Hides files and messages in PNG or BMP images
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Password used to encrypt the data, asked for interactively if missing
    #[arg(short, long, value_name = "password")]
    pub password: Option<String>,

    /// Carrier image (PNG, BMP or JPEG), used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file, either .png or .bmp
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// File(s) to hide in the image
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data files",
        num_args = 1..,
        required_unless_present = "message"
    )]
    pub data_files: Option<Vec<PathBuf>>,

    /// A text message that will be hidden as secret-message.txt
    #[arg(
        short,
        long,
        value_name = "text message",
        required_unless_present = "data_files"
    )]
    pub message: Option<String>,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let password = if self.password.is_none() {
            crate::cli::ask_for_password(true)
        } else {
            self.password
        };

        let output = invisio_core::commands::hide(
            &self.media,
            &self.write_to_file,
            self.data_files,
            self.message,
            password,
            options,
        )?;
        println!("Hidden data written to {}", output.display());

        Ok(())
    }
}
