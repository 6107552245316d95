//! Key-indexed collection store

use std::collections::BTreeMap;

use crate::error::{VaultError, VaultResult};
use crate::record::Record;

use super::{CollectionStore, DEFAULT_NAME};

/// One record per [`Record::key`], indexed in ascending key order
#[derive(Debug, Clone)]
pub struct KeyedStore<R> {
    name: String,
    records: BTreeMap<String, R>,
}

impl<R: Record> Default for KeyedStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> KeyedStore<R> {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            records: BTreeMap::new(),
        }
    }

    pub fn iter(&self) -> std::collections::btree_map::Values<'_, String, R> {
        self.records.values()
    }

    /// Look up a record by key
    pub fn get(&self, key: &str) -> Option<&R> {
        self.records.get(key)
    }

    /// Remove a record by key
    pub fn remove(&mut self, key: &str) -> Option<R> {
        self.records.remove(key)
    }
}

impl<R: Record> CollectionStore<R> for KeyedStore<R> {
    /// Insert, replacing any record with the same key
    fn create(&mut self, record: R) {
        self.records.insert(record.key(), record);
    }

    fn get_by_index(&self, index: usize) -> VaultResult<&R> {
        self.records.values().nth(index).ok_or(VaultError::Index {
            index,
            len: self.records.len(),
        })
    }

    fn size(&self) -> usize {
        self.records.len()
    }

    fn clear(&mut self) {
        self.records.clear();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}
