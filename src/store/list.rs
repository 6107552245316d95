//! Insertion-ordered collection store

use crate::error::{VaultError, VaultResult};
use crate::record::Record;

use super::{CollectionStore, DEFAULT_NAME};

/// Records kept in insertion order
#[derive(Debug, Clone)]
pub struct ListStore<R> {
    name: String,
    records: Vec<R>,
}

impl<R: Record> Default for ListStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ListStore<R> {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            records: Vec::new(),
        }
    }

    /// Create a named store holding `records`
    pub fn with_records(name: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Remove and return the record at `index`
    pub fn remove(&mut self, index: usize) -> VaultResult<R> {
        if index >= self.records.len() {
            return Err(VaultError::Index {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }
}

impl<R: Record> CollectionStore<R> for ListStore<R> {
    fn create(&mut self, record: R) {
        self.records.push(record);
    }

    fn get_by_index(&self, index: usize) -> VaultResult<&R> {
        self.records.get(index).ok_or(VaultError::Index {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SecretEntry;

    #[test]
    fn test_insertion_order() {
        let mut store: ListStore<SecretEntry> = ListStore::new();
        store.create(SecretEntry::new("b", "user", "pw"));
        store.create(SecretEntry::new("a", "user", "pw"));

        assert_eq!(store.get_by_index(0).unwrap().title, "b");
        assert_eq!(store.get_by_index(1).unwrap().title, "a");
    }

    #[test]
    fn test_duplicates_allowed() {
        let entry = SecretEntry::new("GitHub", "octocat", "hunter2");
        let mut store: ListStore<SecretEntry> = ListStore::new();
        store.create(entry.clone());
        store.create(entry);
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn test_out_of_range() {
        let store: ListStore<SecretEntry> = ListStore::new();
        let err = store.get_by_index(0).unwrap_err();
        assert!(matches!(err, VaultError::Index { index: 0, len: 0 }));
    }

    #[test]
    fn test_remove() {
        let mut store = ListStore::with_records(
            "personal",
            vec![
                SecretEntry::new("a", "user", "pw"),
                SecretEntry::new("b", "user", "pw"),
            ],
        );

        assert_eq!(store.remove(0).unwrap().title, "a");
        assert_eq!(store.size(), 1);
        assert!(store.remove(5).is_err());
        assert_eq!(store.name(), "personal");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut store: ListStore<SecretEntry> = ListStore::new();
        store.create(SecretEntry::new("a", "user", "pw"));

        let mut copy = store.clone();
        copy.clear();

        assert_eq!(store.size(), 1);
        assert!(copy.is_empty());
    }
}
