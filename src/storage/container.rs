//! Raw Container
//!
//! The ordered sequence of encrypted chunks for one vault, together with the
//! vault name and the directory it is saved to. The save path is recomputed
//! from the current name on every save and load, so renaming a container
//! redirects it to a different file.

use std::path::{Path, PathBuf};

use crate::audit::AuditLogger;
use crate::error::{VaultError, VaultResult};
use crate::store::DEFAULT_NAME;

use super::file_io::{read_lines, write_lines_atomic};

/// Extension of vault files
pub const VAULT_EXTENSION: &str = "dat";

const COMPONENT: &str = "RawData";

/// Encrypted chunks plus name and save location
///
/// Entries are `Option`s so that a missing chunk can be represented; such a
/// container fails its integrity check and is never written to disk.
#[derive(Debug, Clone)]
pub struct RawContainer {
    data: Vec<Option<String>>,
    name: String,
    output_dir: PathBuf,
    logger: AuditLogger,
}

impl RawContainer {
    /// Create an empty container named `default`
    pub fn new(output_dir: impl Into<PathBuf>, logger: AuditLogger) -> Self {
        Self {
            data: Vec::new(),
            name: DEFAULT_NAME.to_string(),
            output_dir: output_dir.into(),
            logger,
        }
    }

    /// Create an empty container with the given name
    pub fn named(output_dir: impl Into<PathBuf>, name: &str, logger: AuditLogger) -> Self {
        let mut container = Self::new(output_dir, logger);
        container.set_name(name);
        container
    }

    /// The chunk sequence
    pub fn data(&self) -> &[Option<String>] {
        &self.data
    }

    /// Replace the whole chunk sequence
    pub fn set_data(&mut self, data: Vec<Option<String>>) {
        self.logger.log(COMPONENT, "raw data content changing");
        self.data = data;
    }

    /// Replace the whole chunk sequence with present chunks
    pub fn set_chunks(&mut self, chunks: Vec<String>) {
        self.set_data(chunks.into_iter().map(Some).collect());
    }

    /// Append one chunk
    pub fn push(&mut self, chunk: String) {
        self.data.push(Some(chunk));
    }

    /// Present chunks with their positions
    pub fn chunks(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, chunk)| chunk.as_deref().map(|c| (i, c)))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) {
        self.output_dir = output_dir.into();
    }

    pub fn logger(&self) -> &AuditLogger {
        &self.logger
    }

    /// `<output_dir>/<name>.dat`
    ///
    /// Names that are empty, padded with whitespace, or would escape the
    /// output directory are rejected.
    pub fn path(&self) -> VaultResult<PathBuf> {
        let name = self.name.as_str();
        if name.trim().is_empty()
            || name.trim() != name
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || name.contains('\0')
        {
            return Err(VaultError::Config(format!(
                "Invalid container name: {:?}",
                self.name
            )));
        }

        Ok(self.output_dir.join(format!("{}.{}", name, VAULT_EXTENSION)))
    }

    /// Integrity check: the sequence is empty or every entry is present
    pub fn check_data(&self) -> VaultResult<()> {
        self.logger.log(COMPONENT, "raw data checking");
        match self.data.iter().position(Option::is_none) {
            Some(index) => Err(VaultError::Integrity { index }),
            None => Ok(()),
        }
    }

    pub fn is_intact(&self) -> bool {
        self.check_data().is_ok()
    }

    /// Write every chunk to the save path, one per line
    ///
    /// Nothing is written when the integrity check fails. Errors are logged
    /// and returned; the container itself is never modified.
    pub fn save(&self) -> VaultResult<()> {
        let path = self.path().inspect_err(|_| {
            self.logger.log(COMPONENT, "getting root path error");
        })?;

        self.check_data().inspect_err(|e| {
            self.logger.log(COMPONENT, &format!("saving skipped: {}", e));
        })?;

        let lines: Vec<&str> = self.chunks().map(|(_, chunk)| chunk).collect();

        write_lines_atomic(&path, &lines).inspect_err(|e| {
            self.logger.log(COMPONENT, "saving error");
            tracing::warn!(target: "vaultline", path = %path.display(), "{}", e);
        })
    }

    /// Replace the chunk sequence with the lines of the save path
    ///
    /// A missing or unreadable file is logged and returned as an error and the
    /// in-memory sequence is left untouched.
    pub fn load(&mut self) -> VaultResult<()> {
        let path = self.path().inspect_err(|_| {
            self.logger.log(COMPONENT, "getting root path error");
        })?;

        let lines = read_lines(&path).inspect_err(|e| {
            self.logger.log(COMPONENT, "loading error");
            tracing::warn!(target: "vaultline", path = %path.display(), "{}", e);
        })?;

        self.set_chunks(lines);
        Ok(())
    }
}
