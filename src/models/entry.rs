//! Secret entry model
//!
//! One password-manager record: where a credential is used, who it belongs to,
//! and the secret itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::EntryId;
use crate::record::Record;

/// A stored credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Display title (e.g. the site or service name)
    pub title: String,

    /// Login name
    pub username: String,

    /// The secret value (password, token, ...)
    pub secret: String,

    /// Optional address of the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl SecretEntry {
    /// Create a new entry
    pub fn new(
        title: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new(),
            title: title.into(),
            username: username.into(),
            secret: secret.into(),
            url: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Replace the secret value
    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.secret = secret.into();
        self.updated_at = Utc::now();
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Entry title cannot be empty".to_string());
        }
        if self.secret.is_empty() {
            return Err("Entry secret cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Record for SecretEntry {
    const KIND: &'static str = "secret-entry";
    const SCHEMA_VERSION: u16 = 1;

    fn key(&self) -> String {
        self.id.as_uuid().to_string()
    }
}

// Keep the secret out of logs and panics
impl fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("url", &self.url)
            .finish()
    }
}

impl fmt::Display for SecretEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.username)
    }
}
