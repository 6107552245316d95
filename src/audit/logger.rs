//! Process-wide log facility
//!
//! `AuditLogger::log` is fire-and-forget: failures to write the optional log
//! file are swallowed so logging can never abort a pipeline operation.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::entry::AuditEntry;

/// Records pipeline events in memory, forwards them to `tracing`, and
/// optionally appends them to a JSON-lines file
///
/// Clones share the same in-memory journal, so a logger handed to the codec
/// can be inspected afterwards through any clone.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    enabled: bool,
    log_path: Option<PathBuf>,
    journal: Arc<Mutex<Vec<AuditEntry>>>,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLogger {
    /// Create an enabled logger without a file sink
    pub fn new() -> Self {
        Self {
            enabled: true,
            log_path: None,
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a logger that drops every event
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Create an enabled logger that also appends to `log_path`
    pub fn with_file(log_path: PathBuf) -> Self {
        Self {
            log_path: Some(log_path),
            ..Self::new()
        }
    }

    /// Turn logging on or off
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether events are being recorded
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log an event. Never fails.
    pub fn log(&self, component: &str, message: &str) {
        if !self.enabled {
            return;
        }

        tracing::debug!(target: "vaultline", component, "{}", message);

        let entry = AuditEntry::new(component, message);

        if let Some(path) = &self.log_path {
            if let Err(e) = append_entry(path, &entry) {
                tracing::warn!(
                    target: "vaultline",
                    path = %path.display(),
                    "log file write failed: {}",
                    e
                );
            }
        }

        if let Ok(mut journal) = self.journal.lock() {
            journal.push(entry);
        }
    }

    /// Snapshot of all in-memory entries, oldest first
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.journal
            .lock()
            .map(|journal| journal.clone())
            .unwrap_or_default()
    }

    /// Count in-memory entries with the given component and message
    pub fn count_matching(&self, component: &str, message: &str) -> usize {
        self.journal
            .lock()
            .map(|journal| {
                journal
                    .iter()
                    .filter(|e| e.matches(component, message))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Drop all in-memory entries (the log file is left alone)
    pub fn clear(&self) {
        if let Ok(mut journal) = self.journal.lock() {
            journal.clear();
        }
    }

    /// Read every entry persisted to the log file
    ///
    /// Lines that do not parse are skipped.
    pub fn read_file(&self) -> Vec<AuditEntry> {
        let Some(path) = &self.log_path else {
            return Vec::new();
        };

        let Ok(file) = File::open(path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect()
    }

    /// Get the path of the log file, if any
    pub fn path(&self) -> Option<&PathBuf> {
        self.log_path.as_ref()
    }
}

fn append_entry(path: &Path, entry: &AuditEntry) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{}", json)?;
    file.flush()
}
