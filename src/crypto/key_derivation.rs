//! Key derivation from passphrases
//!
//! Supports PBKDF2-HMAC-SHA256 with a fixed iteration count and Argon2id.
//! A fresh random salt is drawn for every encryption, so the same passphrase
//! yields a different key each time.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use argon2::{Argon2, Params};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{VaultError, VaultResult};

use super::algorithm::KeyDerivation;

/// Length of the derived key (AES-256 / ChaCha20)
pub const KEY_SIZE: usize = 32;

/// Length of the random salt in bytes
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count
pub const KEY_OBTENTION_ITERATIONS: u32 = 1000;

/// Argon2id memory cost in KiB (19 MiB)
pub const ARGON2_MEMORY_COST: u32 = 19_456;

/// Argon2id time cost
pub const ARGON2_TIME_COST: u32 = 2;

/// Argon2id lanes
pub const ARGON2_PARALLELISM: u32 = 1;

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

/// Draw a fresh random salt
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive an encryption key from a passphrase and salt
pub fn derive_key(
    passphrase: &str,
    salt: &[u8],
    kdf: KeyDerivation,
) -> VaultResult<DerivedKey> {
    let mut key = [0u8; KEY_SIZE];

    match kdf {
        KeyDerivation::Pbkdf2Sha256 => {
            pbkdf2::pbkdf2_hmac::<Sha256>(
                passphrase.as_bytes(),
                salt,
                KEY_OBTENTION_ITERATIONS,
                &mut key,
            );
        }
        KeyDerivation::Argon2id => {
            let params = Params::new(
                ARGON2_MEMORY_COST,
                ARGON2_TIME_COST,
                ARGON2_PARALLELISM,
                Some(KEY_SIZE),
            )
            .map_err(|e| VaultError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;

            Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
                .hash_password_into(passphrase.as_bytes(), salt, &mut key)
                .map_err(|e| VaultError::Encryption(format!("Key derivation failed: {}", e)))?;
        }
    }

    Ok(DerivedKey { key })
}
