pub mod batch;
pub mod hide;
mod shared;
pub mod unveil;

pub use shared::*;
