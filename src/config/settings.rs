//! User settings for Vaultline
//!
//! Holds the pipeline configuration that replaces any process-wide wiring:
//! which encryption algorithm to use, how decoded records are stored, how
//! many crypto workers to run, and whether to log.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::VaultPaths;
use crate::crypto::{available_parallelism, EncryptionAlgorithm};
use crate::error::VaultError;
use crate::store::StorageOrdering;

/// Configuration passed into pipeline construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Algorithm used to encrypt and decrypt chunks
    #[serde(default)]
    pub algorithm: EncryptionAlgorithm,

    /// Store variant built when decoding
    #[serde(default)]
    pub storage_ordering: StorageOrdering,

    /// Crypto worker count; `None` means all available cores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<usize>,

    /// Whether pipeline events are logged
    #[serde(default = "default_logging")]
    pub logging: bool,
}

fn default_logging() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            algorithm: EncryptionAlgorithm::default(),
            storage_ordering: StorageOrdering::default(),
            pool_size: None,
            logging: default_logging(),
        }
    }
}

impl PipelineConfig {
    /// Worker count clamped to `1..=available_parallelism()`
    pub fn effective_pool_size(&self) -> usize {
        let max = available_parallelism();
        self.pool_size.unwrap_or(max).clamp(1, max)
    }

    pub fn with_algorithm(mut self, algorithm: EncryptionAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_storage_ordering(mut self, ordering: StorageOrdering) -> Self {
        self.storage_ordering = ordering;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = Some(pool_size);
        self
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }
}

/// User settings for Vaultline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory for vault files, overriding `<base>/vaults`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            output_dir: None,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &VaultPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                VaultError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VaultError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> Result<(), VaultError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            VaultError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            VaultError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Apply the configured output directory to `paths`
    pub fn resolve_paths(&self, paths: VaultPaths) -> VaultPaths {
        match &self.output_dir {
            Some(dir) => paths.with_vault_dir(dir.clone()),
            None => paths,
        }
    }
}
