use std::path::{Path, PathBuf};

use crate::engine::{CancellationToken, Engine};
use crate::media::{lossless_format, Carrier, Persist};
use crate::{CodecOptions, InvisioError, Message};

use super::Password;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    files: Option<Vec<PathBuf>>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    password: Password,
    options: CodecOptions,
    cancellation: CancellationToken,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// hidden as `secret-message.txt` after all files
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    pub fn use_files(mut self, data_files: Option<Vec<PathBuf>>) -> Self {
        self.files = data_files;
        self
    }

    pub fn with_files(mut self, data_files: Vec<PathBuf>) -> Self {
        self.files = Some(data_files);
        self
    }

    pub fn with_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        let data_file = data_file.as_ref().to_path_buf();
        if let Some(files) = &mut self.files {
            files.push(data_file);
        } else {
            self.files = Some(vec![data_file]);
        }
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.into();
        self
    }

    /// Set the password
    /// If `None` is passed, no password will be used, leads to no de-/encryption used
    pub fn use_password<S: AsRef<str>>(mut self, password: Option<S>) -> Self {
        self.password = password.map(|s| s.as_ref().to_string()).into();
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Hides everything and writes the new carrier, returns the path of it
    pub fn execute(self) -> Result<PathBuf, InvisioError> {
        self.validate()?;
        let Some(image) = self.image else {
            return Err(InvisioError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(InvisioError::TargetNotSet);
        };
        lossless_format(&output)?;

        let mut message = Message::empty();
        if let Some(files) = &self.files {
            for file in files {
                message.add_file(file)?;
            }
        }
        if let Some(text) = &self.message {
            message.add_text(text)?;
        }

        let mut carrier = Carrier::from_file(&image)?;
        Engine::new(self.options)
            .with_cancellation(self.cancellation)
            .hide(carrier.image_mut(), &message.files, self.password.as_deref())?;
        carrier.save_as(&output)?;

        Ok(output)
    }

    fn validate(&self) -> Result<(), InvisioError> {
        let no_files = self.files.as_ref().map_or(true, Vec::is_empty);
        if self.message.is_none() && no_files {
            return Err(InvisioError::MissingFiles);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgba, RgbaImage};
    use tempfile::tempdir;

    use super::*;

    fn carrier_png(path: &Path) {
        let img: RgbaImage = ImageBuffer::from_fn(64, 64, |x, y| Rgba([x as u8, y as u8, 128, 255]));
        img.save(path).expect("Failed to write carrier image");
    }

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let image = temp_dir.path().join("carrier-image.png");
        carrier_png(&image);

        let output = crate::api::hide::prepare()
            .with_message("Hello, World!")
            .with_image(&image)
            .with_password("SuperSecret42")
            .with_output(temp_dir.path().join("image-with-secret.png"))
            .execute()
            .expect("Failed to hide message in image");

        assert!(output.exists());
    }

    #[test]
    fn should_require_something_to_hide() {
        let result = prepare()
            .with_image("carrier.png")
            .with_output("out.png")
            .execute();

        assert!(matches!(result, Err(InvisioError::MissingFiles)));
    }

    #[test]
    fn should_require_image_and_output() {
        assert!(matches!(
            prepare().with_message("hi").with_output("out.png").execute(),
            Err(InvisioError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().with_message("hi").with_image("in.png").execute(),
            Err(InvisioError::TargetNotSet)
        ));
    }

    #[test]
    fn should_refuse_a_lossy_output_before_reading_anything() {
        let result = prepare()
            .with_file("does-not-exist.txt")
            .with_image("does-not-exist.png")
            .with_output("out.jpg")
            .execute();

        assert!(matches!(result, Err(InvisioError::UnsupportedCarrierFormat)));
    }

    #[test]
    fn should_not_hide_anything_when_cancelled() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let image = temp_dir.path().join("carrier-image.png");
        carrier_png(&image);
        let token = CancellationToken::new();
        token.cancel();

        let output = temp_dir.path().join("never-written.png");
        let result = prepare()
            .with_message("Hello, World!")
            .with_image(&image)
            .with_output(&output)
            .with_cancellation(token)
            .execute();

        assert!(matches!(result, Err(InvisioError::Cancelled)));
        assert!(!output.exists());
    }
}
