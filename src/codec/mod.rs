//! Chunk Transform
//!
//! Composes the Record Codec, Base64 text encoding and the Encryption Engine
//! into one reversible string transform per record, and applies it to whole
//! collections.
//!
//! ```text
//! encode: record -> serialize -> base64 -> encrypt -> chunk
//! decode: chunk  -> decrypt   -> base64 -> deserialize -> record
//! ```
//!
//! Nothing fails across this boundary: per-record and per-chunk errors are
//! logged, skipped, and collected into a [`TransformReport`].

pub mod report;

pub use report::{ChunkFailure, TransformReport};

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::audit::AuditLogger;
use crate::config::PipelineConfig;
use crate::crypto::{EncryptionEngine, Passphrase};
use crate::error::{VaultError, VaultResult};
use crate::record::{self, Record};
use crate::storage::RawContainer;
use crate::store::{CollectionStore, Store};

const COMPONENT: &str = "Encoder";

/// Result of a successful encode pass
#[derive(Debug)]
pub struct Encoded {
    pub container: RawContainer,
    pub report: TransformReport,
}

/// Result of a decode pass
#[derive(Debug)]
pub struct Decoded<R: Record> {
    pub store: Store<R>,
    pub report: TransformReport,
}

/// Encodes collections into containers and back
#[derive(Debug, Clone)]
pub struct ChunkCodec {
    config: PipelineConfig,
    output_dir: PathBuf,
    logger: AuditLogger,
}

impl ChunkCodec {
    /// Create a codec; encoded containers are saved under `output_dir`
    ///
    /// The logger is switched on or off according to `config.logging`, and
    /// every container the codec builds inherits that setting.
    pub fn new(
        config: PipelineConfig,
        output_dir: impl Into<PathBuf>,
        mut logger: AuditLogger,
    ) -> Self {
        logger.set_enabled(config.logging);
        Self {
            config,
            output_dir: output_dir.into(),
            logger,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn logger(&self) -> &AuditLogger {
        &self.logger
    }

    /// A fresh engine for one operation
    fn engine(&self) -> EncryptionEngine {
        EncryptionEngine::new(self.config.algorithm, self.config.effective_pool_size())
    }

    /// Transform one record into a chunk
    pub fn encode_string<R: Record>(
        &self,
        record: &R,
        passphrase: &Passphrase,
    ) -> VaultResult<String> {
        let payload = STANDARD.encode(record::serialize(record)?);
        self.engine().encrypt_str(&payload, passphrase)
    }

    /// Transform one chunk back into a record
    pub fn decode_string<R: Record>(
        &self,
        chunk: &str,
        passphrase: &Passphrase,
    ) -> VaultResult<R> {
        let plaintext = self.engine().decrypt(chunk, passphrase)?;
        decode_payload(&plaintext)
    }

    /// Encode every record of `store`, in index order
    ///
    /// Returns `None` when there is no store or it holds no records. An
    /// out-of-range index ends the pass early and the chunks built so far are
    /// kept.
    pub fn encode_collection<R, S>(
        &self,
        store: Option<&S>,
        passphrase: &Passphrase,
    ) -> Option<Encoded>
    where
        R: Record,
        S: CollectionStore<R>,
    {
        self.logger.log(COMPONENT, "encoding structure");

        let Some(store) = store else {
            self.logger.log(COMPONENT, "nothing to encode: no collection");
            return None;
        };
        if store.is_empty() {
            self.logger.log(COMPONENT, "nothing to encode: empty collection");
            return None;
        }

        let mut report = TransformReport::default();
        let mut payloads: Vec<(usize, String)> = Vec::with_capacity(store.size());

        let mut index = 0;
        while index < store.size() {
            let record = match store.get_by_index(index) {
                Ok(record) => record,
                Err(e) => {
                    self.logger.log(COMPONENT, &format!("encoding stopped early: {}", e));
                    report.truncated = true;
                    break;
                }
            };

            match record::serialize(record) {
                Ok(bytes) => payloads.push((index, STANDARD.encode(bytes))),
                Err(e) => {
                    self.logger.log(COMPONENT, "encoding error");
                    report.record_failure(index, e);
                }
            }
            index += 1;
        }

        let texts: Vec<&str> = payloads.iter().map(|(_, text)| text.as_str()).collect();
        let results = self.engine().encrypt_all(&texts, passphrase);

        let mut chunks = Vec::with_capacity(results.len());
        for ((index, _), result) in payloads.iter().zip(results) {
            match result {
                Ok(chunk) => {
                    chunks.push(chunk);
                    report.succeeded += 1;
                }
                Err(e) => {
                    self.logger.log(COMPONENT, "encoding error");
                    report.record_failure(*index, e);
                }
            }
        }

        let mut container = RawContainer::new(self.output_dir.clone(), self.logger.clone());
        container.set_chunks(chunks);
        container.set_name(store.name());

        Some(Encoded { container, report })
    }

    /// Decode every chunk of `raw` into a fresh store, in order
    ///
    /// Returns `None` when `raw` fails its integrity check or no passphrase is
    /// given. Chunks that cannot be decrypted or deserialized are skipped; a
    /// wrong passphrase therefore yields an empty store whose report counts
    /// one bad key per chunk.
    pub fn decode_collection<R: Record>(
        &self,
        raw: &RawContainer,
        passphrase: Option<&Passphrase>,
    ) -> Option<Decoded<R>> {
        self.logger.log(COMPONENT, "decoding structure");

        if let Err(e) = raw.check_data() {
            self.logger.log(COMPONENT, &format!("decoding skipped: {}", e));
            return None;
        }
        let Some(passphrase) = passphrase else {
            self.logger.log(COMPONENT, "decoding skipped: no passphrase");
            return None;
        };

        let mut store = Store::new(self.config.storage_ordering);
        store.clear();

        let mut report = TransformReport::default();
        let (positions, chunks): (Vec<usize>, Vec<&str>) = raw.chunks().unzip();
        let results = self.engine().decrypt_all(&chunks, passphrase);

        for (index, result) in positions.into_iter().zip(results) {
            match result.and_then(|plaintext| decode_payload::<R>(&plaintext)) {
                Ok(record) => {
                    store.create(record);
                    report.succeeded += 1;
                }
                Err(e) => {
                    let message = match &e {
                        VaultError::BadKey(_) => "decoding bad key",
                        VaultError::Deserialization(_) => "decoding record error",
                        _ => "error while decoding",
                    };
                    self.logger.log(COMPONENT, message);
                    report.record_failure(index, e);
                }
            }
        }

        store.set_name(raw.name());

        Some(Decoded { store, report })
    }
}

/// Base64 text inside a decrypted chunk back to a record
fn decode_payload<R: Record>(plaintext: &[u8]) -> VaultResult<R> {
    let bytes = STANDARD
        .decode(plaintext)
        .map_err(|e| VaultError::Deserialization(format!("Invalid payload encoding: {}", e)))?;
    record::deserialize(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::EncryptionAlgorithm;
    use crate::models::SecretEntry;
    use crate::store::{ListStore, StorageOrdering};
    use tempfile::TempDir;

    fn codec(temp_dir: &TempDir, config: PipelineConfig) -> ChunkCodec {
        ChunkCodec::new(config, temp_dir.path(), AuditLogger::new())
    }

    fn sample_store(count: usize) -> ListStore<SecretEntry> {
        let records = (0..count)
            .map(|i| {
                SecretEntry::new(format!("site {}", i), format!("user{}", i), format!("pw{}", i))
            })
            .collect();
        ListStore::with_records("personal", records)
    }

    fn pass() -> Passphrase {
        Passphrase::new("correct horse battery staple")
    }

    /// Claims more records than it holds
    struct ShrinkingStore {
        inner: ListStore<SecretEntry>,
        claimed: usize,
    }

    impl CollectionStore<SecretEntry> for ShrinkingStore {
        fn create(&mut self, record: SecretEntry) {
            self.inner.create(record);
        }
        fn get_by_index(&self, index: usize) -> VaultResult<&SecretEntry> {
            self.inner.get_by_index(index)
        }
        fn size(&self) -> usize {
            self.claimed
        }
        fn clear(&mut self) {
            self.inner.clear();
        }
        fn name(&self) -> &str {
            self.inner.name()
        }
        fn set_name(&mut self, name: &str) {
            self.inner.set_name(name);
        }
    }

    #[test]
    fn test_string_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());
        let entry = SecretEntry::new("GitHub", "octocat", "hunter2");

        let chunk = codec.encode_string(&entry, &pass()).unwrap();
        assert!(!chunk.contains('\n'));

        let back: SecretEntry = codec.decode_string(&chunk, &pass()).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_collection_round_trip_every_algorithm() {
        let temp_dir = TempDir::new().unwrap();
        let store = sample_store(3);

        for algorithm in EncryptionAlgorithm::ALL {
            let codec = codec(&temp_dir, PipelineConfig::default().with_algorithm(algorithm));

            let encoded = codec.encode_collection(Some(&store), &pass()).unwrap();
            assert!(encoded.report.is_clean());
            assert_eq!(encoded.container.len(), 3);
            assert_eq!(encoded.container.name(), "personal");

            let decoded = codec
                .decode_collection::<SecretEntry>(&encoded.container, Some(&pass()))
                .unwrap();
            assert_eq!(decoded.report.succeeded, 3);
            assert_eq!(decoded.store.to_vec(), store.iter().cloned().collect::<Vec<_>>());
            assert_eq!(decoded.store.name(), "personal");
        }
    }

    #[test]
    fn test_keyed_ordering() {
        let temp_dir = TempDir::new().unwrap();
        let config = PipelineConfig::default().with_storage_ordering(StorageOrdering::Keyed);
        let codec = codec(&temp_dir, config);
        let store = sample_store(4);

        let encoded = codec.encode_collection(Some(&store), &pass()).unwrap();
        let decoded = codec
            .decode_collection::<SecretEntry>(&encoded.container, Some(&pass()))
            .unwrap();

        assert_eq!(decoded.store.ordering(), StorageOrdering::Keyed);
        assert_eq!(decoded.store.size(), 4);
    }

    #[test]
    fn test_encode_none_or_empty() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());

        assert!(codec
            .encode_collection::<SecretEntry, ListStore<SecretEntry>>(None, &pass())
            .is_none());
        assert!(codec.encode_collection(Some(&sample_store(0)), &pass()).is_none());
    }

    #[test]
    fn test_encode_stops_at_out_of_range_index() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());
        let store = ShrinkingStore {
            inner: sample_store(2),
            claimed: 5,
        };

        let encoded = codec.encode_collection(Some(&store), &pass()).unwrap();
        assert_eq!(encoded.container.len(), 2);
        assert!(encoded.report.truncated);
        assert_eq!(encoded.report.succeeded, 2);
    }

    #[test]
    fn test_wrong_passphrase_yields_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());
        let encoded = codec.encode_collection(Some(&sample_store(3)), &pass()).unwrap();

        let decoded = codec
            .decode_collection::<SecretEntry>(&encoded.container, Some(&Passphrase::new("wrong")))
            .unwrap();

        assert!(decoded.store.is_empty());
        assert_eq!(decoded.report.bad_key_count(), 3);
        assert!(decoded.report.looks_like_wrong_passphrase());
        assert_eq!(codec.logger().count_matching("Encoder", "decoding bad key"), 3);
    }

    #[test]
    fn test_corrupt_chunk_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());
        let store = sample_store(3);
        let mut container = codec.encode_collection(Some(&store), &pass()).unwrap().container;

        let mut data = container.data().to_vec();
        data[1] = Some("this is not a chunk".to_string());
        container.set_data(data);

        let decoded = codec
            .decode_collection::<SecretEntry>(&container, Some(&pass()))
            .unwrap();

        assert_eq!(decoded.store.size(), 2);
        assert_eq!(decoded.store.get_by_index(0).unwrap(), store.get_by_index(0).unwrap());
        assert_eq!(decoded.store.get_by_index(1).unwrap(), store.get_by_index(2).unwrap());
        assert_eq!(decoded.report.failures[0].index, 1);
    }

    #[test]
    fn test_chunk_with_foreign_payload_is_deserialization_failure() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());
        let engine = EncryptionEngine::single_threaded(EncryptionAlgorithm::default());

        let mut container = RawContainer::new(temp_dir.path(), AuditLogger::new());
        container.push(engine.encrypt_str("bm90IGpzb24=", &pass()).unwrap());
        container.push(codec.encode_string(&SecretEntry::new("a", "b", "c"), &pass()).unwrap());

        let decoded = codec
            .decode_collection::<SecretEntry>(&container, Some(&pass()))
            .unwrap();

        assert_eq!(decoded.store.size(), 1);
        assert_eq!(decoded.report.deserialization_count(), 1);
    }

    #[test]
    fn test_decode_guards() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());

        let mut broken = RawContainer::new(temp_dir.path(), AuditLogger::new());
        broken.set_data(vec![None]);
        assert!(codec
            .decode_collection::<SecretEntry>(&broken, Some(&pass()))
            .is_none());

        let empty = RawContainer::new(temp_dir.path(), AuditLogger::new());
        assert!(codec.decode_collection::<SecretEntry>(&empty, None).is_none());

        let decoded = codec
            .decode_collection::<SecretEntry>(&empty, Some(&pass()))
            .unwrap();
        assert!(decoded.store.is_empty());
        assert!(decoded.report.is_clean());
    }

    #[test]
    fn test_encryption_is_non_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let codec = codec(&temp_dir, PipelineConfig::default());
        let store = sample_store(1);

        let first = codec.encode_collection(Some(&store), &pass()).unwrap();
        let second = codec.encode_collection(Some(&store), &pass()).unwrap();
        assert_ne!(first.container.data(), second.container.data());
    }

    #[test]
    fn test_logging_switch_silences_pipeline() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new();
        let config = PipelineConfig::default().with_pool_size(1).with_logging(false);
        let codec = ChunkCodec::new(config, temp_dir.path(), logger.clone());

        let encoded = codec.encode_collection(Some(&sample_store(2)), &pass()).unwrap();
        encoded.container.save().unwrap();
        let decoded = codec
            .decode_collection::<SecretEntry>(&encoded.container, Some(&Passphrase::new("nope")))
            .unwrap();

        assert_eq!(decoded.report.bad_key_count(), 2);
        assert!(!codec.logger().is_enabled());
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_logging_enabled_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new();
        let codec = ChunkCodec::new(PipelineConfig::default(), temp_dir.path(), logger.clone());

        codec.encode_collection(Some(&sample_store(1)), &pass());

        assert_eq!(logger.count_matching("Encoder", "encoding structure"), 1);
    }
}
