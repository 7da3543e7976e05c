/// Options for LSB (Least Significant Bit) image encoding.
///
/// Both values are recorded in the stream header, so unveiling never needs
/// them, only hiding does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// How many of the lowest bits of each color channel carry data.
    ///
    /// Note this number influences the capacity directly, but also the visibility.
    pub bits_per_channel: BitDepth,

    /// If true no alpha channel would be used for encoding,
    /// this reduces then the capacity by one channel per pixel
    pub skip_alpha_channel: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            bits_per_channel: BitDepth::One,
            skip_alpha_channel: true,
        }
    }
}

impl CodecOptions {
    pub fn with_bits_per_channel(mut self, bits_per_channel: BitDepth) -> Self {
        self.bits_per_channel = bits_per_channel;
        self
    }

    pub fn with_alpha_channel(mut self, use_alpha: bool) -> Self {
        self.skip_alpha_channel = !use_alpha;
        self
    }

    pub fn channels_per_pixel(&self) -> u8 {
        if self.skip_alpha_channel {
            3
        } else {
            4
        }
    }
}

/// Number of low bits used per color channel.
///
/// Only divisors of 8 are supported, so a byte never straddles two pixels
/// in an unaligned way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BitDepth {
    One,
    Two,
    Four,
}

impl BitDepth {
    pub fn bits(&self) -> u32 {
        match self {
            BitDepth::One => 1,
            BitDepth::Two => 2,
            BitDepth::Four => 4,
        }
    }

    /// the mask that selects the carrying bits of a channel value
    pub fn mask(&self) -> u8 {
        (1u8 << self.bits()) - 1
    }

    pub(crate) fn code(&self) -> u8 {
        match self {
            BitDepth::One => 0,
            BitDepth::Two => 1,
            BitDepth::Four => 2,
        }
    }

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BitDepth::One),
            1 => Some(BitDepth::Two),
            2 => Some(BitDepth::Four),
            _ => None,
        }
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(BitDepth::One),
            2 => Ok(BitDepth::Two),
            4 => Ok(BitDepth::Four),
            other => Err(format!("{other} bits per channel are not supported, use 1, 2 or 4")),
        }
    }
}
