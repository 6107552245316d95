//! Record Codec
//!
//! Turns one record into a self-describing byte payload and back. Record
//! types opt in through the [`Record`] capability trait, so the payload kind
//! is checked at decode time instead of relying on runtime casts.

pub mod codec;

pub use codec::{deserialize, serialize};

use serde::{de::DeserializeOwned, Serialize};

/// A record that can be stored in a vault
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Type tag written into every payload
    const KIND: &'static str;

    /// Schema version written into every payload; payloads with another
    /// version are rejected
    const SCHEMA_VERSION: u16;

    /// Stable identity used by keyed collections
    fn key(&self) -> String;
}
