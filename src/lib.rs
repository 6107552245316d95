//! Vaultline - encrypted line-oriented storage for secret records
//!
//! This library persists a collection of password-manager records as a text
//! file with one encrypted chunk per line, and rebuilds the collection from
//! that file given the passphrase.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and pipeline configuration
//! - `error`: Custom error types
//! - `audit`: Log facility used for every recoverable error
//! - `crypto`: Passphrase-based encryption engine
//! - `record`: Record Codec (record <-> self-describing bytes)
//! - `models`: The `SecretEntry` record type
//! - `store`: In-memory collections of decoded records
//! - `storage`: Raw Container and its file persistence
//! - `codec`: Chunk Transform tying the pieces together
//! - `cli`: Command handlers for the `vaultline` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use vaultline::audit::AuditLogger;
//! use vaultline::codec::ChunkCodec;
//! use vaultline::config::PipelineConfig;
//! use vaultline::crypto::Passphrase;
//! use vaultline::models::SecretEntry;
//! use vaultline::store::ListStore;
//!
//! let codec = ChunkCodec::new(PipelineConfig::default(), vault_dir, AuditLogger::new());
//! let passphrase = Passphrase::new("correct horse battery staple");
//!
//! let entry = SecretEntry::new("GitHub", "octocat", "hunter2");
//! let store = ListStore::with_records("personal", vec![entry]);
//! let encoded = codec.encode_collection(Some(&store), &passphrase).unwrap();
//! encoded.container.save()?;
//!
//! let decoded = codec
//!     .decode_collection::<SecretEntry>(&encoded.container, Some(&passphrase))
//!     .unwrap();
//! ```

pub mod audit;
pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod record;
pub mod storage;
pub mod store;

pub use error::{VaultError, VaultResult};
