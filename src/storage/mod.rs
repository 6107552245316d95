//! Storage layer for Vaultline
//!
//! Provides the Raw Container and the line-oriented file I/O it persists
//! through.

pub mod container;
pub mod file_io;

pub use container::{RawContainer, VAULT_EXTENSION};
pub use file_io::{read_lines, write_lines_atomic};
