//! Password based key derivation.
//!
//! The parameters are part of the container format. Changing any of them
//! requires a new format version, otherwise previously hidden data can no
//! longer be opened.

use argon2::{Algorithm, Argon2, ParamsBuilder, Version};
use zeroize::Zeroizing;

use crate::{CipherError, Result, KEY_LEN, SALT_LEN};

/// Argon2id memory cost in KiB
pub const KDF_MEMORY_KIB: u32 = 19 * 1024;
/// Argon2id number of passes
pub const KDF_ITERATIONS: u32 = 2;
/// Argon2id lanes
pub const KDF_PARALLELISM: u32 = 1;

pub type Key = Zeroizing<[u8; KEY_LEN]>;

/// Outcome of a key derivation.
///
/// An absent password leads to [`KeyMaterial::Unencrypted`], the caller then
/// stores the payload as is.
pub enum KeyMaterial {
    Unencrypted,
    Derived {
        key: Key,
        /// has to be stored next to the ciphertext to derive the same key again
        salt: [u8; SALT_LEN],
    },
}

impl KeyMaterial {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, KeyMaterial::Derived { .. })
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyMaterial::Unencrypted => write!(f, "KeyMaterial::Unencrypted"),
            KeyMaterial::Derived { .. } => write!(f, "KeyMaterial::Derived(***)"),
        }
    }
}

/// derives the key material for an optional password
pub fn derive(password: Option<&str>, salt: &[u8; SALT_LEN]) -> Result<KeyMaterial> {
    match password {
        None => Ok(KeyMaterial::Unencrypted),
        Some(password) => Ok(KeyMaterial::Derived {
            key: derive_key(password.as_bytes(), salt)?,
            salt: *salt,
        }),
    }
}

/// derives a 256 bit key from a password and salt with argon2id
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<Key> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    versioned_argon()?
        .hash_password_into(password, salt, &mut *key)
        .map_err(CipherError::KeyDerivationError)?;

    Ok(key)
}

fn versioned_argon<'key>() -> Result<Argon2<'key>> {
    let params = ParamsBuilder::default()
        .m_cost(KDF_MEMORY_KIB)
        .t_cost(KDF_ITERATIONS)
        .p_cost(KDF_PARALLELISM)
        .output_len(KEY_LEN)
        .build()
        .map_err(CipherError::KeyDerivationParamError)?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}
