//! Password-based encryption engine
//!
//! Every call to `encrypt` draws a fresh salt and nonce, derives a key from
//! the passphrase, and seals the payload with the configured AEAD cipher. The
//! output is self-contained text:
//!
//! ```text
//! base64( version | algorithm tag | salt (16) | nonce (12) | ciphertext + tag )
//! ```
//!
//! Batches can be spread over a rayon pool sized to the available hardware
//! parallelism. Results always come back in input order.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::Aes256Gcm;
use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::ChaCha20Poly1305;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{VaultError, VaultResult};

use super::algorithm::{CipherKind, EncryptionAlgorithm};
use super::key_derivation::{derive_key, generate_salt, DerivedKey, SALT_SIZE};
use super::secure_memory::Passphrase;

/// Ciphertext format version
pub const FORMAT_VERSION: u8 = 1;

/// Size of the AEAD nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

const HEADER_SIZE: usize = 2 + SALT_SIZE + NONCE_SIZE;

/// Upper bound for the worker pool: the machine's available parallelism
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Passphrase-based encryption engine
#[derive(Debug)]
pub struct EncryptionEngine {
    algorithm: EncryptionAlgorithm,
    pool_size: usize,
    pool: Option<ThreadPool>,
}

impl Default for EncryptionEngine {
    fn default() -> Self {
        Self::new(EncryptionAlgorithm::default(), available_parallelism())
    }
}

impl EncryptionEngine {
    /// Create an engine for `algorithm` with up to `pool_size` workers
    ///
    /// The pool size is clamped to `1..=available_parallelism()`. With a single
    /// worker no pool is built and batches run on the calling thread.
    pub fn new(algorithm: EncryptionAlgorithm, pool_size: usize) -> Self {
        let pool_size = pool_size.clamp(1, available_parallelism());

        let pool = if pool_size > 1 {
            match ThreadPoolBuilder::new()
                .num_threads(pool_size)
                .thread_name(|i| format!("vaultline-crypto-{}", i))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::warn!(
                        target: "vaultline",
                        "worker pool unavailable, running inline: {}",
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        let pool_size = if pool.is_some() { pool_size } else { 1 };

        Self {
            algorithm,
            pool_size,
            pool,
        }
    }

    /// Create a single-threaded engine
    pub fn single_threaded(algorithm: EncryptionAlgorithm) -> Self {
        Self::new(algorithm, 1)
    }

    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.algorithm
    }

    /// Number of workers available for batch operations
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Encrypt raw bytes
    pub fn encrypt(&self, plaintext: &[u8], passphrase: &Passphrase) -> VaultResult<String> {
        let salt = generate_salt();
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);

        let key = derive_key(passphrase, &salt, self.algorithm.key_derivation())?;
        let sealed = seal(self.algorithm.cipher(), &key, &nonce, plaintext)?;

        let mut out = Vec::with_capacity(HEADER_SIZE + sealed.len());
        out.push(FORMAT_VERSION);
        out.push(self.algorithm.tag());
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);

        Ok(STANDARD.encode(out))
    }

    /// Encrypt a string
    pub fn encrypt_str(&self, plaintext: &str, passphrase: &Passphrase) -> VaultResult<String> {
        self.encrypt(plaintext.as_bytes(), passphrase)
    }

    /// Decrypt text produced by `encrypt`
    ///
    /// Every failure to open the ciphertext (wrong passphrase, tampering,
    /// truncation, a different algorithm) is reported as `BadKey`.
    pub fn decrypt(&self, ciphertext: &str, passphrase: &Passphrase) -> VaultResult<Vec<u8>> {
        let raw = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| VaultError::BadKey(format!("Invalid ciphertext encoding: {}", e)))?;

        if raw.len() < HEADER_SIZE {
            return Err(VaultError::BadKey(format!(
                "Ciphertext too short: {} bytes",
                raw.len()
            )));
        }

        if raw[0] != FORMAT_VERSION {
            return Err(VaultError::BadKey(format!(
                "Unsupported ciphertext version: {}",
                raw[0]
            )));
        }

        if raw[1] != self.algorithm.tag() {
            let found = EncryptionAlgorithm::from_tag(raw[1])
                .map(|a| a.name().to_string())
                .unwrap_or_else(|| format!("tag {}", raw[1]));
            return Err(VaultError::BadKey(format!(
                "Ciphertext sealed with {}, engine uses {}",
                found, self.algorithm
            )));
        }

        let salt = &raw[2..2 + SALT_SIZE];
        let nonce = &raw[2 + SALT_SIZE..HEADER_SIZE];
        let sealed = &raw[HEADER_SIZE..];

        let key = derive_key(passphrase, salt, self.algorithm.key_derivation())?;
        open(self.algorithm.cipher(), &key, nonce, sealed)
    }

    /// Decrypt to a string
    pub fn decrypt_str(&self, ciphertext: &str, passphrase: &Passphrase) -> VaultResult<String> {
        let plaintext = self.decrypt(ciphertext, passphrase)?;
        String::from_utf8(plaintext)
            .map_err(|e| VaultError::BadKey(format!("Invalid UTF-8 in decrypted data: {}", e)))
    }

    /// Encrypt a batch of payloads, preserving input order
    pub fn encrypt_all<P>(
        &self,
        payloads: &[P],
        passphrase: &Passphrase,
    ) -> Vec<VaultResult<String>>
    where
        P: AsRef<[u8]> + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| {
                payloads
                    .par_iter()
                    .map(|p| self.encrypt(p.as_ref(), passphrase))
                    .collect()
            }),
            None => payloads
                .iter()
                .map(|p| self.encrypt(p.as_ref(), passphrase))
                .collect(),
        }
    }

    /// Decrypt a batch of ciphertexts, preserving input order
    pub fn decrypt_all<C>(
        &self,
        ciphertexts: &[C],
        passphrase: &Passphrase,
    ) -> Vec<VaultResult<Vec<u8>>>
    where
        C: AsRef<str> + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| {
                ciphertexts
                    .par_iter()
                    .map(|c| self.decrypt(c.as_ref(), passphrase))
                    .collect()
            }),
            None => ciphertexts
                .iter()
                .map(|c| self.decrypt(c.as_ref(), passphrase))
                .collect(),
        }
    }
}

fn seal(
    cipher: CipherKind,
    key: &DerivedKey,
    nonce: &[u8],
    plaintext: &[u8],
) -> VaultResult<Vec<u8>> {
    let result = match cipher {
        CipherKind::Aes256Gcm => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?
            .encrypt(aes_gcm::Nonce::from_slice(nonce), plaintext),
        CipherKind::ChaCha20Poly1305 => ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?
            .encrypt(chacha20poly1305::Nonce::from_slice(nonce), plaintext),
    };

    result.map_err(|e| VaultError::Encryption(format!("Encryption failed: {}", e)))
}

fn open(
    cipher: CipherKind,
    key: &DerivedKey,
    nonce: &[u8],
    sealed: &[u8],
) -> VaultResult<Vec<u8>> {
    let result = match cipher {
        CipherKind::Aes256Gcm => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?
            .decrypt(aes_gcm::Nonce::from_slice(nonce), sealed),
        CipherKind::ChaCha20Poly1305 => ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| VaultError::Encryption(format!("Failed to create cipher: {}", e)))?
            .decrypt(chacha20poly1305::Nonce::from_slice(nonce), sealed),
    };

    result.map_err(|_| {
        VaultError::BadKey("Decryption failed: invalid key or corrupted data".to_string())
    })
}
