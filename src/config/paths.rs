//! Path management for Vaultline
//!
//! Vault files are written to an explicitly configured directory rather than
//! next to the installed binary.
//!
//! ## Path Resolution Order
//!
//! 1. `VAULTLINE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/vaultline` or `~/.config/vaultline`
//! 3. Windows: `%APPDATA%\vaultline`

use std::path::PathBuf;

use crate::error::VaultError;

/// Manages all paths used by Vaultline
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Base directory for all Vaultline data
    base_dir: PathBuf,
    /// Override for the directory holding `.dat` vault files
    vault_dir: Option<PathBuf>,
}

impl VaultPaths {
    /// Create a new VaultPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, VaultError> {
        let base_dir = if let Ok(custom) = std::env::var("VAULTLINE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self {
            base_dir,
            vault_dir: None,
        })
    }

    /// Create VaultPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            vault_dir: None,
        }
    }

    /// Use `dir` for vault files instead of `<base>/vaults`
    pub fn with_vault_dir(mut self, dir: PathBuf) -> Self {
        self.vault_dir = Some(dir);
        self
    }

    /// Get the base directory (~/.config/vaultline/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory that holds `<name>.dat` vault files
    pub fn vault_dir(&self) -> PathBuf {
        self.vault_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("vaults"))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the pipeline log
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("vaultline.log")
    }

    /// Ensure the base and vault directories exist
    pub fn ensure_directories(&self) -> Result<(), VaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.vault_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create vault directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join("vaultline"));
    }

    let home = std::env::var("HOME")
        .map_err(|_| VaultError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("vaultline"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, VaultError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| VaultError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("vaultline"))
}
