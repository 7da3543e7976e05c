use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

pub use image::RgbaImage;
use image::ImageFormat;
use log::error;

use crate::error::InvisioError;
use crate::media::{Capacity, CodecOptions};
use crate::result::Result;

use super::Persist;

/// a decoded carrier image, 8 bits per channel in RGBA order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    image: RgbaImage,
}

impl Carrier {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// loads a PNG, BMP or JPEG image, a JPEG can only serve as the source of a new carrier
    pub fn from_file(f: &Path) -> Result<Self> {
        match extension(f).as_deref() {
            Some("png" | "bmp" | "jpg" | "jpeg") => {
                let image = image::open(f).map_err(|e| {
                    error!("Error decoding image {f:?}: {e}");
                    InvisioError::InvalidImageMedia
                })?;

                Ok(Self::from_image(image.to_rgba8()))
            }
            _ => Err(InvisioError::UnsupportedMedia),
        }
    }

    /// loads an image that is expected to carry hidden data, lossy formats are refused
    pub fn from_secret_file(f: &Path) -> Result<Self> {
        lossless_format(f)?;
        Self::from_file(f)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn capacity(&self, options: &CodecOptions) -> Capacity {
        let (width, height) = self.dimensions();
        Capacity::new(width, height, options)
    }

    pub fn save_to_writer<W: Write + Seek>(&self, mut writer: W, format: ImageFormat) -> Result<()> {
        self.image.write_to(&mut writer, format).map_err(|e| {
            error!("Error saving image: {e}");
            InvisioError::ImageEncodingError
        })
    }
}

impl Persist for Carrier {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let format = lossless_format(file)?;
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            InvisioError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        self.save_to_writer(&mut writer, format)?;

        writer
            .flush()
            .map_err(|source| InvisioError::WriteError { source })
    }
}

/// the lossless format matching the file extension.
///
/// JPEG recompression destroys the least significant bits, so it is reported
/// as [`InvisioError::UnsupportedCarrierFormat`].
pub fn lossless_format(f: &Path) -> Result<ImageFormat> {
    match extension(f).as_deref() {
        Some("png") => Ok(ImageFormat::Png),
        Some("bmp") => Ok(ImageFormat::Bmp),
        Some("jpg" | "jpeg") => Err(InvisioError::UnsupportedCarrierFormat),
        _ => Err(InvisioError::UnsupportedMedia),
    }
}

fn extension(f: &Path) -> Option<String> {
    f.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}
