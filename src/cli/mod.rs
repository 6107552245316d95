//! CLI command handlers
//!
//! Bridges clap argument parsing with the encode/decode pipeline.

pub mod vault;

pub use vault::{handle_vault_command, Session, VaultCommands};
