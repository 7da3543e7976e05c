pub use aes_gcm::Error as AesGcmError;
pub use argon2::Error as Argon2Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("Key derivation error")]
    KeyDerivationError(Argon2Error),

    #[error("Key derivation parameter error")]
    KeyDerivationParamError(Argon2Error),

    #[error("Encryption error")]
    EncryptionError(AesGcmError),

    /// The authentication tag did not verify, either the key is wrong or the data was altered
    #[error("Incorrect password or corrupted data")]
    AuthenticationFailed,

    /// The sealed data is shorter than salt, nonce and tag together
    #[error("Sealed data is truncated, got {0} bytes")]
    Truncated(usize),
}
