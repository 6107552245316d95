//! Configuration module for Vaultline
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Pipeline configuration (algorithm, store ordering, worker pool, logging)
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::{PipelineConfig, Settings};
