pub mod capacity;
pub mod codec_options;
pub mod image;
pub mod payload;
mod types;

use std::path::Path;

pub use capacity::Capacity;
pub use codec_options::{BitDepth, CodecOptions};
pub use types::*;

pub trait Persist {
    fn save_as(&mut self, _: &Path) -> crate::Result<()>;
}
