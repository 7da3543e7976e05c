use thiserror::Error;

pub use invisio_cipher::CipherError;

#[derive(Error, Debug)]
pub enum InvisioError {
    /// The payload needs more bits than the carrier offers, reported before any pixel is touched
    #[error(
        "Capacity Error: The image is too small to hide all the data. {required_bits} bits are needed but only {available_bits} bits are available"
    )]
    InsufficientCapacity {
        required_bits: u64,
        available_bits: u64,
    },

    /// No marker was found, the image never carried hidden data or uses an unknown format version
    #[error("No hidden data found in the image")]
    NoHiddenData,

    /// Wrong password or tampered ciphertext, both are deliberately reported the same way
    #[error("Incorrect password or corrupted data")]
    AuthenticationFailed,

    /// Length, checksum or entry count do not add up, e.g. the image was recompressed
    #[error("The hidden data is corrupted, the image might have been edited or recompressed")]
    CorruptPayload,

    /// The carrier format cannot preserve the least significant bits, e.g. JPEG
    #[error("This image format cannot preserve hidden data, use PNG or BMP instead")]
    UnsupportedCarrierFormat,

    /// The caller aborted the operation
    #[error("The operation was cancelled")]
    Cancelled,

    /// Hidden data is encrypted but no password was given
    #[error("This image contains encrypted data. Please provide a password.")]
    PasswordRequired,

    /// Represents an unsupported carrier media. For example, a text file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents an error caused by an invalid filename, for example an empty or non UTF-8 file name
    #[error("A file with an invalid file name was provided")]
    InvalidFileName,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Represents an error of the key derivation or encryption itself
    #[error("Encryption error")]
    EncryptionError(CipherError),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target set")]
    TargetNotSet,

    #[error("API Error: Missing files")]
    MissingFiles,
}

impl From<CipherError> for InvisioError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::AuthenticationFailed => InvisioError::AuthenticationFailed,
            CipherError::Truncated(len) => {
                log::debug!("sealed body of {len} bytes is shorter than its fixed overhead");
                InvisioError::CorruptPayload
            }
            other => InvisioError::EncryptionError(other),
        }
    }
}
