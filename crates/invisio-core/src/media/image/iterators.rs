use std::iter::Take;
use std::ops::Range;
use std::slice::{ChunksExact, ChunksExactMut, Iter, IterMut};

use image::RgbaImage;

use crate::engine::CancellationToken;

const RGBA: usize = 4;

/// Mutable access to the color channels of a range of pixels, row by row,
/// channel by channel (R, G, B and optionally A).
///
/// Ends early once the cancellation token fires, checked at every row start.
pub(crate) struct ColorIterMut<'a> {
    width: usize,
    index: usize,
    take: usize,
    pixels: ChunksExactMut<'a, u8>,
    colors: Take<IterMut<'a, u8>>,
    cancellation: CancellationToken,
}

impl<'a> ColorIterMut<'a> {
    pub fn new(
        image: &'a mut RgbaImage,
        pixels: Range<usize>,
        skip_alpha: bool,
        cancellation: CancellationToken,
    ) -> Self {
        let width = image.width().max(1) as usize;
        let buf: &'a mut [u8] = image;
        Self {
            width,
            index: pixels.start,
            take: if skip_alpha { 3 } else { 4 },
            pixels: buf[pixels.start * RGBA..pixels.end * RGBA].chunks_exact_mut(RGBA),
            colors: <&mut [u8]>::default().iter_mut().take(0),
            cancellation,
        }
    }
}

impl<'a> Iterator for ColorIterMut<'a> {
    type Item = &'a mut u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(color) = self.colors.next() {
                return Some(color);
            }
            if self.index % self.width == 0 && self.cancellation.is_cancelled() {
                return None;
            }
            let pixel = self.pixels.next()?;
            self.index += 1;
            self.colors = pixel.iter_mut().take(self.take);
        }
    }
}

/// Readonly counterpart of [`ColorIterMut`]
pub(crate) struct ColorIter<'a> {
    width: usize,
    index: usize,
    take: usize,
    pixels: ChunksExact<'a, u8>,
    colors: Take<Iter<'a, u8>>,
    cancellation: CancellationToken,
}

impl<'a> ColorIter<'a> {
    pub fn new(
        image: &'a RgbaImage,
        pixels: Range<usize>,
        skip_alpha: bool,
        cancellation: CancellationToken,
    ) -> Self {
        let width = image.width().max(1) as usize;
        let buf: &'a [u8] = image;
        Self {
            width,
            index: pixels.start,
            take: if skip_alpha { 3 } else { 4 },
            pixels: buf[pixels.start * RGBA..pixels.end * RGBA].chunks_exact(RGBA),
            colors: <&[u8]>::default().iter().take(0),
            cancellation,
        }
    }
}

impl<'a> Iterator for ColorIter<'a> {
    type Item = &'a u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(color) = self.colors.next() {
                return Some(color);
            }
            if self.index % self.width == 0 && self.cancellation.is_cancelled() {
                return None;
            }
            let pixel = self.pixels.next()?;
            self.index += 1;
            self.colors = pixel.iter().take(self.take);
        }
    }
}
