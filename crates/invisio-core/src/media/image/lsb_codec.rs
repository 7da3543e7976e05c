use std::io::{self, Cursor, Read, Write};
use std::ops::Range;

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};
use image::RgbaImage;

use super::iterators::{ColorIter, ColorIterMut};
use crate::engine::CancellationToken;
use crate::media::BitDepth;

/// overwrites the low bits of a color channel, leaving the high bits untouched
pub trait HideBits {
    fn hide_bits(self, value: u8, depth: BitDepth);
}

impl HideBits for &mut u8 {
    fn hide_bits(self, value: u8, depth: BitDepth) {
        let mask = depth.mask();
        *self = (*self & !mask) | (value & mask);
    }
}

/// Where and how densely bits are placed in a carrier
#[derive(Debug, Clone)]
pub struct Placement {
    pub pixels: Range<usize>,
    pub skip_alpha: bool,
    pub depth: BitDepth,
}

/// Factory for decoder and encoder
pub struct LsbCodec;

impl LsbCodec {
    /// builds a LSB Image Decoder that implements Read
    pub fn decoder<'i>(
        input: &'i RgbaImage,
        placement: Placement,
        cancellation: CancellationToken,
    ) -> Box<dyn Read + 'i> {
        Box::new(LsbReader::new(
            ColorIter::new(input, placement.pixels, placement.skip_alpha, cancellation),
            placement.depth,
        ))
    }

    /// builds a LSB Image Encoder that implements Write
    pub fn encoder<'i>(
        carrier: &'i mut RgbaImage,
        placement: Placement,
        cancellation: CancellationToken,
    ) -> Box<dyn Write + 'i> {
        Box::new(LsbWriter::new(
            ColorIterMut::new(carrier, placement.pixels, placement.skip_alpha, cancellation),
            placement.depth,
        ))
    }
}

/// Writes bytes, least significant bit first, into the low bits of color channels
pub struct LsbWriter<I> {
    channels: I,
    depth: BitDepth,
}

impl<'a, I: Iterator<Item = &'a mut u8>> LsbWriter<I> {
    pub fn new(channels: I, depth: BitDepth) -> Self {
        Self { channels, depth }
    }
}

impl<'a, I: Iterator<Item = &'a mut u8>> Write for LsbWriter<I> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let bits = self.depth.bits();
        let channels_per_byte = (8 / bits) as usize;
        let mut source = BitReader::endian(Cursor::new(buf), LittleEndian);

        for written in 0..buf.len() {
            // a byte is only written when all of its channels are available
            let slots: Vec<&mut u8> = self.channels.by_ref().take(channels_per_byte).collect();
            if slots.len() < channels_per_byte {
                if written == 0 {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "carrier has no channels left",
                    ));
                }
                return Ok(written);
            }

            for channel in slots {
                let value: u8 = source.read(bits)?;
                channel.hide_bits(value, self.depth);
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads bytes back from the low bits of color channels
pub struct LsbReader<I> {
    channels: I,
    depth: BitDepth,
}

impl<'a, I: Iterator<Item = &'a u8>> LsbReader<I> {
    pub fn new(channels: I, depth: BitDepth) -> Self {
        Self { channels, depth }
    }
}

impl<'a, I: Iterator<Item = &'a u8>> Read for LsbReader<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bits = self.depth.bits();
        let mask = self.depth.mask();
        let channels_per_byte = 8 / bits;
        let mut sink = BitWriter::endian(Vec::with_capacity(buf.len()), LittleEndian);

        'bytes: for _ in 0..buf.len() {
            for _ in 0..channels_per_byte {
                match self.channels.next() {
                    Some(channel) => sink.write(bits, channel & mask)?,
                    None => break 'bytes,
                }
            }
        }

        // an incomplete last byte is dropped
        let bytes = sink.into_writer();
        buf[..bytes.len()].copy_from_slice(&bytes);

        Ok(bytes.len())
    }
}
