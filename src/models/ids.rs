//! Strongly-typed identifier for secret entries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "ent-";

/// Identifier of a [`SecretEntry`](super::SecretEntry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = EntryId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("ent-"));
        assert_eq!(display.len(), 12); // "ent-" + 8 chars
    }

    #[test]
    fn test_id_uniqueness() {
        assert_ne!(EntryId::new(), EntryId::new());
    }

    #[test]
    fn test_id_parse_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain: EntryId = uuid_str.parse().unwrap();
        let prefixed: EntryId = format!("ent-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(EntryId::parse(uuid_str).unwrap(), plain);
    }
}
