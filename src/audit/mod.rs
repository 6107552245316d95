//! Logging facility for Vaultline
//!
//! Every recoverable error in the pipeline is turned into a log event rather
//! than propagated. Events carry the component that raised them and a short
//! message.
//!
//! # Example
//!
//! ```rust,ignore
//! use vaultline::audit::AuditLogger;
//!
//! let logger = AuditLogger::with_file(paths.log_file());
//! logger.log("RawData", "saving error");
//! ```

mod entry;
mod logger;

pub use entry::AuditEntry;
pub use logger::AuditLogger;
