//! The self describing stream that is written into a carrier.
//!
//! ```text
//! [12 bytes] magic marker `INVISIOVAULT`
//! [1 byte  ] flags
//! [u32 BE  ] body length
//! [N bytes ] body, either a packed payload or a sealed envelope
//! [u32 BE  ] CRC-32 of everything above, only if the checksum flag is set
//! ```
//!
//! Flags:
//!
//! ```text
//! bit 0    body is encrypted
//! bit 1    trailing stream checksum present
//! bit 2-3  body bits per channel, 0 => 1, 1 => 2, 2 => 4
//! bit 4    body uses the alpha channel
//! bit 5-7  format version
//! ```

use invisio_cipher::SealedEnvelope;

use crate::media::{BitDepth, CodecOptions};
use crate::result::Result;
use crate::InvisioError;

pub const MAGIC: &[u8; 12] = b"INVISIOVAULT";
pub const FORMAT_VERSION: u8 = 1;
pub const HEADER_LEN: usize = MAGIC.len() + 1 + 4;
pub const CHECKSUM_LEN: usize = 4;

const ENCRYPTED: u8 = 1 << 0;
const STREAM_CHECKSUM: u8 = 1 << 1;
const DEPTH_SHIFT: u8 = 2;
const DEPTH_MASK: u8 = 0b11 << DEPTH_SHIFT;
const ALPHA_CHANNEL: u8 = 1 << 4;
const VERSION_SHIFT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub encrypted: bool,
    pub stream_checksum: bool,
    pub depth: BitDepth,
    pub alpha_channel: bool,
}

impl Flags {
    /// encrypted bodies are covered by their tag, plain ones get a trailing checksum
    pub fn new(encrypted: bool, options: &CodecOptions) -> Self {
        Self {
            encrypted,
            stream_checksum: !encrypted,
            depth: options.bits_per_channel,
            alpha_channel: !options.skip_alpha_channel,
        }
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions::default()
            .with_bits_per_channel(self.depth)
            .with_alpha_channel(self.alpha_channel)
    }

    pub fn to_byte(&self) -> u8 {
        let mut b = FORMAT_VERSION << VERSION_SHIFT;
        if self.encrypted {
            b |= ENCRYPTED;
        }
        if self.stream_checksum {
            b |= STREAM_CHECKSUM;
        }
        if self.alpha_channel {
            b |= ALPHA_CHANNEL;
        }
        b | (self.depth.code() << DEPTH_SHIFT)
    }

    pub fn from_byte(b: u8) -> Result<Self> {
        let version = b >> VERSION_SHIFT;
        if version != FORMAT_VERSION {
            log::warn!("found format version {version}, only version {FORMAT_VERSION} is supported");
            return Err(InvisioError::NoHiddenData);
        }
        let depth = BitDepth::from_code((b & DEPTH_MASK) >> DEPTH_SHIFT).ok_or_else(|| {
            log::debug!("invalid bits per channel code in flags {b:#010b}");
            InvisioError::NoHiddenData
        })?;

        Ok(Self {
            encrypted: b & ENCRYPTED != 0,
            stream_checksum: b & STREAM_CHECKSUM != 0,
            depth,
            alpha_channel: b & ALPHA_CHANNEL != 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    pub flags: Flags,
    pub length: u32,
}

impl StreamHeader {
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[..MAGIC.len()].copy_from_slice(MAGIC);
        buf[MAGIC.len()] = self.flags.to_byte();
        buf[MAGIC.len() + 1..].copy_from_slice(&self.length.to_be_bytes());

        buf
    }

    /// fails with [`InvisioError::NoHiddenData`] if the marker is missing
    pub fn parse(buf: &[u8; HEADER_LEN]) -> Result<Self> {
        if &buf[..MAGIC.len()] != MAGIC {
            return Err(InvisioError::NoHiddenData);
        }
        let flags = Flags::from_byte(buf[MAGIC.len()])?;
        let mut length = [0u8; 4];
        length.copy_from_slice(&buf[MAGIC.len() + 1..]);

        Ok(Self {
            flags,
            length: u32::from_be_bytes(length),
        })
    }

    /// bytes following the header: body and optional checksum
    pub fn tail_len(&self) -> usize {
        self.length as usize
            + if self.flags.stream_checksum {
                CHECKSUM_LEN
            } else {
                0
            }
    }
}

/// The body is either stored as is or sealed, decided by one flag bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Plain(Vec<u8>),
    Sealed(SealedEnvelope),
}

impl Body {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Body::Sealed(_))
    }
}

/// A body framed by its header, ready to be embedded
#[derive(Debug)]
pub struct EmbeddedStream {
    pub header: StreamHeader,
    /// body followed by the optional checksum
    pub tail: Vec<u8>,
}

impl EmbeddedStream {
    pub fn new(body: &Body, options: &CodecOptions) -> Result<Self> {
        let body_bytes = match body {
            Body::Plain(data) => data.clone(),
            Body::Sealed(envelope) => envelope.to_bytes(),
        };
        let length = u32::try_from(body_bytes.len()).map_err(|_| {
            InvisioError::InsufficientCapacity {
                required_bits: body_bytes.len() as u64 * 8,
                available_bits: u32::MAX as u64 * 8,
            }
        })?;
        let header = StreamHeader {
            flags: Flags::new(body.is_encrypted(), options),
            length,
        };

        let mut tail = body_bytes;
        if header.flags.stream_checksum {
            let checksum = stream_checksum(&header.to_bytes(), &tail);
            tail.extend_from_slice(&checksum.to_be_bytes());
        }

        Ok(Self { header, tail })
    }

    /// verifies the optional checksum and interprets the body
    pub fn open(header: StreamHeader, mut tail: Vec<u8>) -> Result<Body> {
        if tail.len() != header.tail_len() {
            return Err(InvisioError::CorruptPayload);
        }
        if header.flags.stream_checksum {
            let mut stored = [0u8; CHECKSUM_LEN];
            stored.copy_from_slice(&tail[header.length as usize..]);
            tail.truncate(header.length as usize);

            if stream_checksum(&header.to_bytes(), &tail) != u32::from_be_bytes(stored) {
                log::debug!("stream checksum mismatch");
                return Err(InvisioError::CorruptPayload);
            }
        }

        if header.flags.encrypted {
            Ok(Body::Sealed(SealedEnvelope::from_bytes(&tail)?))
        } else {
            Ok(Body::Plain(tail))
        }
    }
}

fn stream_checksum(header: &[u8], body: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(header);
    hasher.update(body);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use invisio_cipher::{NONCE_LEN, SALT_LEN, TAG_LEN};

    use super::*;

    #[test]
    fn should_encode_flags_as_documented() {
        let flags = Flags::new(true, &CodecOptions::default());
        assert_eq!(flags.to_byte(), 0b001_0_00_0_1);

        let opts = CodecOptions::default()
            .with_alpha_channel(true)
            .with_bits_per_channel(BitDepth::Two);
        let flags = Flags::new(false, &opts);
        assert_eq!(flags.to_byte(), 0b001_1_01_1_0);
        assert_eq!(Flags::from_byte(flags.to_byte()).unwrap(), flags);
        assert_eq!(flags.codec_options(), opts);
    }

    #[test]
    fn should_reject_unknown_versions_and_depths() {
        assert!(matches!(
            Flags::from_byte(0b010_0_00_1_0),
            Err(InvisioError::NoHiddenData)
        ));
        assert!(matches!(
            Flags::from_byte(0b000_0_00_1_0),
            Err(InvisioError::NoHiddenData)
        ));
        assert!(matches!(
            Flags::from_byte(0b001_0_11_1_0),
            Err(InvisioError::NoHiddenData)
        ));
    }

    #[test]
    fn should_write_magic_flags_and_big_endian_length() {
        let header = StreamHeader {
            flags: Flags::new(false, &CodecOptions::default()),
            length: 0x0102_0304,
        };
        let bytes = header.to_bytes();

        assert_eq!(&bytes[..12], b"INVISIOVAULT");
        assert_eq!(bytes[12], 0b001_0_00_1_0);
        assert_eq!(&bytes[13..], &[1, 2, 3, 4]);
        assert_eq!(StreamHeader::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn should_reject_a_missing_marker() {
        let mut bytes = StreamHeader {
            flags: Flags::new(false, &CodecOptions::default()),
            length: 3,
        }
        .to_bytes();
        bytes[0] = b'X';

        assert!(matches!(
            StreamHeader::parse(&bytes),
            Err(InvisioError::NoHiddenData)
        ));
    }

    #[test]
    fn should_append_and_verify_the_stream_checksum_for_plain_bodies() {
        let body = Body::Plain(b"packed payload".to_vec());
        let stream = EmbeddedStream::new(&body, &CodecOptions::default()).unwrap();
        assert_eq!(stream.header.length, 14);
        assert_eq!(stream.tail.len(), 14 + CHECKSUM_LEN);

        let opened = EmbeddedStream::open(stream.header, stream.tail.clone()).unwrap();
        assert_eq!(opened, body);

        for position in [0, 13, 14, 17] {
            let mut tail = stream.tail.clone();
            tail[position] ^= 0b1000_0000;
            assert!(matches!(
                EmbeddedStream::open(stream.header, tail),
                Err(InvisioError::CorruptPayload)
            ));
        }
    }

    #[test]
    fn should_carry_sealed_bodies_without_checksum() {
        let envelope = SealedEnvelope {
            salt: [1; SALT_LEN],
            nonce: [2; NONCE_LEN],
            tag: [3; TAG_LEN],
            ciphertext: vec![4; 10],
        };
        let body = Body::Sealed(envelope);
        let stream = EmbeddedStream::new(&body, &CodecOptions::default()).unwrap();

        assert!(stream.header.flags.encrypted);
        assert!(!stream.header.flags.stream_checksum);
        assert_eq!(stream.tail.len(), SALT_LEN + NONCE_LEN + TAG_LEN + 10);
        assert_eq!(
            EmbeddedStream::open(stream.header, stream.tail).unwrap(),
            body
        );
    }

    #[test]
    fn should_reject_a_truncated_sealed_body() {
        let header = StreamHeader {
            flags: Flags::new(true, &CodecOptions::default()),
            length: 5,
        };
        assert!(matches!(
            EmbeddedStream::open(header, vec![0; 5]),
            Err(InvisioError::CorruptPayload)
        ));
    }
}
