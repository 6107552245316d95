//! Per-chunk outcome of an encode or decode pass

use std::fmt;

use crate::error::VaultError;

/// A chunk (or record) that could not be transformed
#[derive(Debug)]
pub struct ChunkFailure {
    /// Position in the container (decode) or store (encode)
    pub index: usize,
    pub error: VaultError,
}

/// Successes and failures accumulated over one pass
#[derive(Debug, Default)]
pub struct TransformReport {
    /// Number of records or chunks transformed
    pub succeeded: usize,
    /// Items that were skipped, in order
    pub failures: Vec<ChunkFailure>,
    /// Whether an encode pass stopped early on an out-of-range index
    pub truncated: bool,
}

impl TransformReport {
    pub(crate) fn record_failure(&mut self, index: usize, error: VaultError) {
        self.failures.push(ChunkFailure { index, error });
    }

    /// True when nothing was skipped and the pass ran to the end
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.truncated
    }

    /// Number of items skipped
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Chunks that failed because the passphrase did not open them
    pub fn bad_key_count(&self) -> usize {
        self.failures.iter().filter(|f| f.error.is_bad_key()).count()
    }

    /// Chunks that decrypted but did not hold a valid record
    pub fn deserialization_count(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.error.is_deserialization())
            .count()
    }

    /// True when every item failed with a bad key, which almost always
    /// means the wrong passphrase was supplied
    pub fn looks_like_wrong_passphrase(&self) -> bool {
        self.succeeded == 0 && !self.failures.is_empty() && self.bad_key_count() == self.failed()
    }
}

impl fmt::Display for TransformReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ok, {} skipped", self.succeeded, self.failed())?;
        if self.truncated {
            write!(f, " (stopped early)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = TransformReport::default();
        assert!(report.is_clean());

        report.succeeded = 2;
        report.record_failure(1, VaultError::BadKey("x".into()));
        report.record_failure(3, VaultError::Deserialization("y".into()));

        assert!(!report.is_clean());
        assert_eq!(report.failed(), 2);
        assert_eq!(report.bad_key_count(), 1);
        assert_eq!(report.deserialization_count(), 1);
        assert!(!report.looks_like_wrong_passphrase());
        assert_eq!(report.to_string(), "2 ok, 2 skipped");
    }

    #[test]
    fn test_wrong_passphrase_heuristic() {
        let mut report = TransformReport::default();
        report.record_failure(0, VaultError::BadKey("x".into()));
        report.record_failure(1, VaultError::BadKey("x".into()));
        assert!(report.looks_like_wrong_passphrase());
    }
}
