//! Authenticated encryption of a payload.
//!
//! Byte layout of a sealed envelope:
//!
//! ```text
//! [16 bytes] argon2id salt
//! [12 bytes] AES-256-GCM nonce
//! [16 bytes] authentication tag
//! [N bytes ] ciphertext, same length as the plaintext
//! ```

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::kdf::{derive_key, Key};
use crate::{CipherError, Result, NONCE_LEN, SALT_LEN, TAG_LEN};

/// size of everything but the ciphertext
pub const ENVELOPE_OVERHEAD: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

#[derive(Clone, PartialEq, Eq)]
pub struct SealedEnvelope {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

impl std::fmt::Debug for SealedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedEnvelope")
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

impl SealedEnvelope {
    /// encrypts `plaintext` with an already derived key, salt and nonce are taken as given
    pub fn seal(
        key: &Key,
        salt: [u8; SALT_LEN],
        nonce: [u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> Result<Self> {
        let cipher = Aes256Gcm::new(key.as_slice().into());
        let mut ciphertext = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut ciphertext)
            .map_err(CipherError::EncryptionError)?;

        let mut tag_bytes = [0u8; TAG_LEN];
        tag_bytes.copy_from_slice(tag.as_slice());

        Ok(Self {
            salt,
            nonce,
            tag: tag_bytes,
            ciphertext,
        })
    }

    /// decrypts and verifies the envelope, a tag mismatch is reported as
    /// [`CipherError::AuthenticationFailed`]
    pub fn open(&self, key: &Key) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(key.as_slice().into());
        let mut plaintext = self.ciphertext.clone();
        cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(&self.nonce),
                b"",
                &mut plaintext,
                Tag::from_slice(&self.tag),
            )
            .map_err(|_| CipherError::AuthenticationFailed)?;

        Ok(plaintext)
    }

    pub fn len(&self) -> usize {
        ENVELOPE_OVERHEAD + self.ciphertext.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.tag);
        buf.extend_from_slice(&self.ciphertext);

        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < ENVELOPE_OVERHEAD {
            return Err(CipherError::Truncated(data.len()));
        }
        let (salt, rest) = data.split_at(SALT_LEN);
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let mut envelope = Self {
            salt: [0u8; SALT_LEN],
            nonce: [0u8; NONCE_LEN],
            tag: [0u8; TAG_LEN],
            ciphertext: ciphertext.to_vec(),
        };
        envelope.salt.copy_from_slice(salt);
        envelope.nonce.copy_from_slice(nonce);
        envelope.tag.copy_from_slice(tag);

        Ok(envelope)
    }
}

/// encrypt data with password, fresh salt and nonce are drawn from `rng`
pub fn encrypt_data<R: RngCore + CryptoRng>(
    password: &str,
    data: &[u8],
    rng: &mut R,
) -> Result<SealedEnvelope> {
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let key = derive_key(password.as_bytes(), &salt)?;
    let envelope = SealedEnvelope::seal(&key, salt, nonce, data);

    salt.zeroize();
    nonce.zeroize();

    envelope
}

/// decrypt data with password, the key is derived again from the stored salt
pub fn decrypt_data(password: &str, envelope: &SealedEnvelope) -> Result<Vec<u8>> {
    let key = derive_key(password.as_bytes(), &envelope.salt)?;
    envelope.open(&key)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    const LOREM: &[u8] = b"lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

    #[test]
    fn test_encryption_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let envelope = encrypt_data("resistance is futile", LOREM, &mut rng).unwrap();

        assert_eq!(envelope.ciphertext.len(), LOREM.len());
        assert_ne!(envelope.ciphertext.as_slice(), LOREM);

        let plain = decrypt_data("resistance is futile", &envelope).unwrap();
        assert_eq!(plain.as_slice(), LOREM);
    }

    #[test]
    fn should_be_reproducible_with_the_same_seed() {
        let a = encrypt_data("pw", LOREM, &mut ChaCha20Rng::seed_from_u64(7)).unwrap();
        let b = encrypt_data("pw", LOREM, &mut ChaCha20Rng::seed_from_u64(7)).unwrap();
        let c = encrypt_data("pw", LOREM, &mut ChaCha20Rng::seed_from_u64(8)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a.nonce, c.nonce);
        assert_ne!(a.salt, c.salt);
    }

    #[test]
    fn should_fail_authentication_with_wrong_password() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let envelope = encrypt_data("Secr3t!", LOREM, &mut rng).unwrap();

        match decrypt_data("wrong", &envelope) {
            Err(CipherError::AuthenticationFailed) => {}
            other => panic!("expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[test]
    fn should_fail_authentication_on_any_flipped_bit() {
        let key = derive_key(b"Secr3t!", &[3u8; SALT_LEN]).unwrap();
        let envelope = SealedEnvelope::seal(&key, [3u8; SALT_LEN], [9u8; NONCE_LEN], LOREM).unwrap();
        let bytes = envelope.to_bytes();

        // nonce, tag and ciphertext, the salt only matters for key derivation
        for position in [SALT_LEN, SALT_LEN + NONCE_LEN + 3, bytes.len() - 1] {
            let mut tampered = bytes.clone();
            tampered[position] ^= 0b0000_0100;
            let tampered = SealedEnvelope::from_bytes(&tampered).unwrap();

            assert!(matches!(
                tampered.open(&key),
                Err(CipherError::AuthenticationFailed)
            ));
        }
    }

    #[test]
    fn should_parse_what_it_serialized() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let envelope = encrypt_data("pw", b"", &mut rng).unwrap();
        let bytes = envelope.to_bytes();

        assert_eq!(bytes.len(), ENVELOPE_OVERHEAD);
        assert!(envelope.is_empty());
        assert_eq!(SealedEnvelope::from_bytes(&bytes).unwrap(), envelope);
        assert_eq!(decrypt_data("pw", &envelope).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn should_reject_truncated_data() {
        match SealedEnvelope::from_bytes(&[0u8; ENVELOPE_OVERHEAD - 1]) {
            Err(CipherError::Truncated(len)) => assert_eq!(len, ENVELOPE_OVERHEAD - 1),
            other => panic!("expected Truncated, got {other:?}"),
        }
    }
}
