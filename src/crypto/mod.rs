//! Cryptographic functions for Vaultline
//!
//! Provides passphrase-based authenticated encryption with a selectable
//! key-derivation function (PBKDF2-HMAC-SHA256 or Argon2id) and cipher
//! (AES-256-GCM or ChaCha20-Poly1305).

pub mod algorithm;
pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use algorithm::{CipherKind, EncryptionAlgorithm, KeyDerivation};
pub use encryption::{available_parallelism, EncryptionEngine};
pub use key_derivation::{derive_key, DerivedKey, KEY_OBTENTION_ITERATIONS};
pub use secure_memory::Passphrase;
