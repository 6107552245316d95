//! Self-describing JSON payloads for records
//!
//! Payload layout:
//!
//! ```json
//! { "kind": "secret-entry", "version": 1, "record": { ... } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

use super::Record;

#[derive(Serialize)]
struct PayloadRef<'a, R> {
    kind: &'a str,
    version: u16,
    record: &'a R,
}

#[derive(Deserialize)]
struct PayloadOwned {
    kind: String,
    version: u16,
    record: serde_json::Value,
}

/// Serialize a record into a byte payload
pub fn serialize<R: Record>(record: &R) -> VaultResult<Vec<u8>> {
    let payload = PayloadRef {
        kind: R::KIND,
        version: R::SCHEMA_VERSION,
        record,
    };

    serde_json::to_vec(&payload)
        .map_err(|e| VaultError::Json(format!("Failed to serialize {}: {}", R::KIND, e)))
}

/// Deserialize a byte payload produced by [`serialize`]
///
/// Fails with `Deserialization` on truncated or corrupted bytes, on a payload
/// for another record kind, and on a schema version mismatch.
pub fn deserialize<R: Record>(bytes: &[u8]) -> VaultResult<R> {
    let payload: PayloadOwned = serde_json::from_slice(bytes)
        .map_err(|e| VaultError::Deserialization(format!("Malformed payload: {}", e)))?;

    if payload.kind != R::KIND {
        return Err(VaultError::Deserialization(format!(
            "Expected record kind '{}', found '{}'",
            R::KIND,
            payload.kind
        )));
    }

    if payload.version != R::SCHEMA_VERSION {
        return Err(VaultError::Deserialization(format!(
            "Unsupported {} schema version {} (expected {})",
            R::KIND,
            payload.version,
            R::SCHEMA_VERSION
        )));
    }

    serde_json::from_value(payload.record)
        .map_err(|e| VaultError::Deserialization(format!("Invalid {}: {}", R::KIND, e)))
}
