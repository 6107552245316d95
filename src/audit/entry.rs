//! Log entry data structure
//!
//! Each entry names the pipeline component that produced it and a short
//! human-readable message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Component that produced the event (e.g. "Encoder", "RawData")
    pub component: String,

    /// What happened
    pub message: String,
}

impl AuditEntry {
    /// Create a new entry stamped with the current time
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            component: component.into(),
            message: message.into(),
        }
    }

    /// Check whether this entry came from `component` with exactly `message`
    pub fn matches(&self, component: &str, message: &str) -> bool {
        self.component == component && self.message == message
    }
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.component,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization() {
        let entry = AuditEntry::new("Encoder", "decoding bad key");
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"component\":\"Encoder\""));
        assert!(json.contains("\"message\":\"decoding bad key\""));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_entry_display() {
        let entry = AuditEntry::new("RawData", "saving error");
        let display = entry.to_string();
        assert!(display.ends_with("[RawData] saving error"));
    }

    #[test]
    fn test_matches() {
        let entry = AuditEntry::new("RawData", "loading error");
        assert!(entry.matches("RawData", "loading error"));
        assert!(!entry.matches("Encoder", "loading error"));
    }
}
