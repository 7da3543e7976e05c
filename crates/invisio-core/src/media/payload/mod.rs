pub mod packed;
pub mod stream;

pub use packed::{pack, packed_len, unpack, PayloadEntry};
pub use stream::{Body, EmbeddedStream, Flags, StreamHeader};
