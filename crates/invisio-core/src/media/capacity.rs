//! Capacity planning, decides whether a stream fits into a carrier before
//! a single pixel is changed.
//!
//! The stream header always occupies the R, G and B channels of the first
//! [`HEADER_PIXELS`] pixels at one bit per channel. Everything after it
//! belongs to the body and uses the configured channels and depth.

use std::ops::Range;

use crate::media::payload::stream::HEADER_LEN;
use crate::media::CodecOptions;
use crate::result::Result;
use crate::InvisioError;

/// color channels that carry the header
pub const HEADER_CHANNELS: u64 = 3;

/// pixels reserved for the header, rounded up to whole pixels
pub const HEADER_PIXELS: u64 = (HEADER_LEN as u64 * 8).div_ceil(HEADER_CHANNELS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub width: u32,
    pub height: u32,
    pub channels_per_pixel: u8,
    pub bits_per_channel: u32,
}

impl Capacity {
    pub fn new(width: u32, height: u32, options: &CodecOptions) -> Self {
        Self {
            width,
            height,
            channels_per_pixel: options.channels_per_pixel(),
            bits_per_channel: options.bits_per_channel.bits(),
        }
    }

    fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// all bits the carrier could hold, header region included
    pub fn total_bits(&self) -> u64 {
        self.pixels() * self.channels_per_pixel as u64 * self.bits_per_channel as u64
    }

    /// true if at least the header can be embedded
    pub fn header_fits(&self) -> bool {
        self.pixels() >= HEADER_PIXELS
    }

    /// bits left for the body once the header region is reserved
    pub fn available_bits(&self) -> u64 {
        self.pixels().saturating_sub(HEADER_PIXELS)
            * self.channels_per_pixel as u64
            * self.bits_per_channel as u64
    }

    pub fn available_bytes(&self) -> u64 {
        self.available_bits() / 8
    }

    /// fails with [`InvisioError::InsufficientCapacity`] if `required_bits` do not fit
    pub fn validate(&self, required_bits: u64) -> Result<()> {
        if !self.header_fits() {
            return Err(InvisioError::InsufficientCapacity {
                required_bits: required_bits + HEADER_LEN as u64 * 8,
                available_bits: 0,
            });
        }
        validate(required_bits, self.available_bits())
    }

    pub fn header_region(&self) -> Range<usize> {
        0..(HEADER_PIXELS.min(self.pixels()) as usize)
    }

    pub fn body_region(&self) -> Range<usize> {
        let pixels = self.pixels() as usize;
        (HEADER_PIXELS as usize).min(pixels)..pixels
    }
}

/// bits a body of `len` bytes occupies
pub fn required_bits(len: usize) -> u64 {
    len as u64 * 8
}

pub fn validate(required_bits: u64, available_bits: u64) -> Result<()> {
    if required_bits > available_bits {
        return Err(InvisioError::InsufficientCapacity {
            required_bits,
            available_bits,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::BitDepth;

    #[test]
    fn should_reserve_the_header_pixels() {
        assert_eq!(HEADER_PIXELS, 46);

        let capacity = Capacity::new(512, 512, &CodecOptions::default());
        assert_eq!(capacity.total_bits(), 512 * 512 * 3);
        assert_eq!(capacity.available_bits(), (512 * 512 - 46) * 3);
        assert_eq!(capacity.body_region(), 46..512 * 512);
        assert_eq!(capacity.header_region(), 0..46);
    }

    #[test]
    fn should_scale_with_channels_and_depth() {
        let opts = CodecOptions::default()
            .with_alpha_channel(true)
            .with_bits_per_channel(BitDepth::Four);
        let capacity = Capacity::new(10, 10, &opts);

        assert_eq!(capacity.available_bits(), (100 - 46) * 4 * 4);
        assert_eq!(capacity.available_bytes(), (100 - 46) * 2);
    }

    #[test]
    fn should_accept_the_exact_boundary_and_reject_one_bit_more() {
        let capacity = Capacity::new(17, 14, &CodecOptions::default());
        let available = capacity.available_bits();
        assert_eq!(available, 576);

        assert!(capacity.validate(available).is_ok());
        match capacity.validate(available + 1) {
            Err(InvisioError::InsufficientCapacity {
                required_bits,
                available_bits,
            }) => {
                assert_eq!(required_bits, 577);
                assert_eq!(available_bits, 576);
            }
            other => panic!("expected InsufficientCapacity, got {other:?}"),
        }
    }

    #[test]
    fn should_have_no_capacity_when_the_header_does_not_fit() {
        let capacity = Capacity::new(5, 9, &CodecOptions::default());

        assert!(!capacity.header_fits());
        assert_eq!(capacity.available_bits(), 0);
        assert_eq!(capacity.body_region(), 45..45);
        assert!(matches!(
            capacity.validate(0),
            Err(InvisioError::InsufficientCapacity {
                required_bits: 136,
                available_bits: 0,
            })
        ));
    }
}
