//! Record types stored in a vault

pub mod entry;
pub mod ids;

pub use entry::SecretEntry;
pub use ids::EntryId;
