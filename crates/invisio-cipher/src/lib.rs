//! # Invisio Cipher
//! Key derivation and authenticated encryption for hidden payloads.
//!
//! All functions are stateless, salts and nonces are passed in explicitly or
//! drawn from a caller provided random number generator.

pub mod envelope;
pub mod error;
pub mod kdf;

pub use crate::envelope::{decrypt_data, encrypt_data, SealedEnvelope, ENVELOPE_OVERHEAD};
pub use crate::error::CipherError;
pub use crate::kdf::{derive, derive_key, Key, KeyMaterial};

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

pub type Result<T> = std::result::Result<T, CipherError>;
