//! Composes packing, encryption, capacity planning and the LSB codec into
//! the two operations hide and extract.
//!
//! A run either completes fully or fails with one typed error. Hide never
//! leaves a half written carrier behind: the capacity is validated before
//! any pixel changes and embedding happens on a scratch copy that replaces
//! the carrier only on success.

mod cancel;
mod stage;

use std::io::{self, Read, Write};
use std::sync::Arc;

use image::RgbaImage;
use invisio_cipher::{decrypt_data, encrypt_data};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

pub use cancel::CancellationToken;
pub use stage::{LogObserver, Stage, StageObserver};

use crate::media::capacity::{required_bits, Capacity};
use crate::media::image::{LsbCodec, Placement};
use crate::media::payload::stream::HEADER_LEN;
use crate::media::payload::{pack, unpack, Body, EmbeddedStream, PayloadEntry, StreamHeader};
use crate::media::{BitDepth, CodecOptions};
use crate::result::Result;
use crate::InvisioError;

#[derive(Clone)]
pub struct Engine {
    options: CodecOptions,
    cancellation: CancellationToken,
    observer: Arc<dyn StageObserver>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(CodecOptions::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("cancellation", &self.cancellation)
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(options: CodecOptions) -> Self {
        Self {
            options,
            cancellation: CancellationToken::default(),
            observer: Arc::new(LogObserver),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// hides `entries` in `carrier`, salt and nonce come from the OS random source
    pub fn hide(
        &self,
        carrier: &mut RgbaImage,
        entries: &[PayloadEntry],
        password: Option<&str>,
    ) -> Result<()> {
        self.hide_with_rng(carrier, entries, password, &mut OsRng)
    }

    /// same as [`Engine::hide`] with an injected random source
    pub fn hide_with_rng<R: RngCore + CryptoRng>(
        &self,
        carrier: &mut RgbaImage,
        entries: &[PayloadEntry],
        password: Option<&str>,
        rng: &mut R,
    ) -> Result<()> {
        let result = self.try_hide(carrier, entries, password, rng);
        self.finish(result)
    }

    /// recovers all hidden entries in the order they were hidden
    pub fn extract(
        &self,
        carrier: &RgbaImage,
        password: Option<&str>,
    ) -> Result<Vec<PayloadEntry>> {
        let result = self.try_extract(carrier, password);
        self.finish(result)
    }

    fn try_hide<R: RngCore + CryptoRng>(
        &self,
        carrier: &mut RgbaImage,
        entries: &[PayloadEntry],
        password: Option<&str>,
        rng: &mut R,
    ) -> Result<()> {
        self.enter(Stage::Packing)?;
        let packed = pack(entries)?;

        let body = match password {
            Some(password) => {
                self.enter(Stage::Encrypting)?;
                Body::Sealed(encrypt_data(password, &packed, rng)?)
            }
            None => Body::Plain(packed),
        };

        self.enter(Stage::CapacityCheck)?;
        let stream = EmbeddedStream::new(&body, &self.options)?;
        let (width, height) = carrier.dimensions();
        let capacity = Capacity::new(width, height, &self.options);
        capacity.validate(required_bits(stream.tail.len()))?;

        self.enter(Stage::Embedding)?;
        let mut scratch = carrier.clone();
        self.embed(&mut scratch, &capacity, &stream)?;
        *carrier = scratch;

        log::info!(
            "hid {} files in {} bytes, encrypted: {}",
            entries.len(),
            stream.tail.len(),
            stream.header.flags.encrypted
        );

        Ok(())
    }

    fn embed(
        &self,
        image: &mut RgbaImage,
        capacity: &Capacity,
        stream: &EmbeddedStream,
    ) -> Result<()> {
        LsbCodec::encoder(image, header_placement(capacity), self.cancellation.clone())
            .write_all(&stream.header.to_bytes())
            .map_err(|e| self.write_failed(e))?;

        let body = Placement {
            pixels: capacity.body_region(),
            skip_alpha: self.options.skip_alpha_channel,
            depth: self.options.bits_per_channel,
        };
        LsbCodec::encoder(image, body, self.cancellation.clone())
            .write_all(&stream.tail)
            .map_err(|e| self.write_failed(e))?;

        // a cancel after the last row check still discards the scratch copy
        self.cancellation.check()
    }

    fn try_extract(&self, carrier: &RgbaImage, password: Option<&str>) -> Result<Vec<PayloadEntry>> {
        self.enter(Stage::HeaderRead)?;
        let (width, height) = carrier.dimensions();
        let header_capacity = Capacity::new(width, height, &CodecOptions::default());
        if !header_capacity.header_fits() {
            log::debug!("{width}x{height} pixels are too few for a stream header");
            return Err(InvisioError::NoHiddenData);
        }

        let mut buf = [0u8; HEADER_LEN];
        LsbCodec::decoder(
            carrier,
            header_placement(&header_capacity),
            self.cancellation.clone(),
        )
        .read_exact(&mut buf)
        .map_err(|e| self.read_failed(e))?;
        let header = StreamHeader::parse(&buf)?;

        self.enter(Stage::BodyRead)?;
        let options = header.flags.codec_options();
        let capacity = Capacity::new(width, height, &options);
        let tail_len = header.tail_len();
        if required_bits(tail_len) > capacity.available_bits() {
            log::debug!(
                "declared length of {} bytes exceeds the capacity of {} bytes",
                header.length,
                capacity.available_bytes()
            );
            return Err(InvisioError::CorruptPayload);
        }

        let mut tail = vec![0u8; tail_len];
        let body = Placement {
            pixels: capacity.body_region(),
            skip_alpha: options.skip_alpha_channel,
            depth: options.bits_per_channel,
        };
        LsbCodec::decoder(carrier, body, self.cancellation.clone())
            .read_exact(&mut tail)
            .map_err(|e| self.read_failed(e))?;
        self.cancellation.check()?;

        let packed = match EmbeddedStream::open(header, tail)? {
            Body::Sealed(envelope) => {
                let password = password.ok_or(InvisioError::PasswordRequired)?;
                self.enter(Stage::Decrypting)?;
                decrypt_data(password, &envelope)?
            }
            Body::Plain(packed) => {
                if password.is_some() {
                    log::warn!("hidden data is not encrypted, the password is ignored");
                }
                packed
            }
        };

        self.enter(Stage::Unpacking)?;
        let entries = unpack(&packed)?;
        log::info!("recovered {} files", entries.len());

        Ok(entries)
    }

    fn enter(&self, stage: Stage) -> Result<()> {
        self.cancellation.check()?;
        self.observer.on_stage(stage);
        Ok(())
    }

    fn finish<T>(&self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.observer.on_stage(Stage::Done),
            Err(e) => self.observer.on_failure(e),
        }
        result
    }

    fn write_failed(&self, e: io::Error) -> InvisioError {
        if self.cancellation.is_cancelled() {
            return InvisioError::Cancelled;
        }
        log::error!("Error encoding image: {e}, kind {}", e.kind());
        InvisioError::ImageEncodingError
    }

    fn read_failed(&self, e: io::Error) -> InvisioError {
        if self.cancellation.is_cancelled() {
            return InvisioError::Cancelled;
        }
        match e.kind() {
            io::ErrorKind::UnexpectedEof => InvisioError::CorruptPayload,
            _ => InvisioError::ReadError { source: e },
        }
    }
}

/// the header always sits at one bit per R, G and B channel
fn header_placement(capacity: &Capacity) -> Placement {
    Placement {
        pixels: capacity.header_region(),
        skip_alpha: true,
        depth: BitDepth::One,
    }
}
