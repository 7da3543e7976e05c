//! # Invisio Core API
//!
//! Hides one or many files inside PNG or BMP images by overwriting the least
//! significant bits of the color channels, optionally encrypted with a
//! password (argon2id + AES-256-GCM).
//!
//! The builders in [`api`] are the entry points, the [`engine::Engine`] does
//! the actual work on decoded pixel buffers.
//!
//! # Usage Examples
//!
//! ## Hide data inside an image
//!
//! ```rust
//! use image::{ImageBuffer, Rgba, RgbaImage};
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier-image.png");
//! let img: RgbaImage = ImageBuffer::from_fn(128, 128, |x, y| Rgba([x as u8, y as u8, 42, 255]));
//! img.save(&carrier).expect("Failed to write carrier image");
//!
//! invisio_core::api::hide::prepare()
//!     .with_file("Cargo.toml")        // will hide this file inside the image
//!     .with_message("Hello, World!")  // will hide this message inside the image too
//!     .with_password("SuperSecret42") // will encrypt all the data with this password
//!     .with_image(&carrier)
//!     .with_output(temp_dir.path().join("image-with-a-file-inside.png"))
//!     .execute()
//!     .expect("Failed to hide file in image");
//! ```
//!
//! ## Unveil data from an image
//!
//! ```rust,no_run
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//!
//! let files = invisio_core::api::unveil::prepare()
//!     .from_secret_file("image-with-a-file-inside.png")
//!     .using_password("SuperSecret42")
//!     .into_output_folder(temp_dir.path())
//!     .execute()
//!     .expect("Failed to unveil files from image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod commands;
pub mod engine;
pub mod error;
pub mod media;
pub mod message;
pub mod result;

pub use crate::engine::{CancellationToken, Engine, Stage, StageObserver};
pub use crate::error::InvisioError;
pub use crate::media::payload::PayloadEntry;
pub use crate::media::{BitDepth, Capacity, Carrier, CodecOptions};
pub use crate::message::Message;
pub use crate::result::Result;
