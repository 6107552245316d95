//! Collection Store
//!
//! In-memory collections of decoded records. The Chunk Transform reads a
//! store through [`CollectionStore`] when encoding and builds a fresh
//! [`Store`] of the configured [`StorageOrdering`] when decoding.

pub mod keyed;
pub mod list;

pub use keyed::KeyedStore;
pub use list::ListStore;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VaultResult;
use crate::record::Record;

/// Name given to new stores and containers
pub const DEFAULT_NAME: &str = "default";

/// Named, indexed collection of records
pub trait CollectionStore<R: Record> {
    /// Add a record
    fn create(&mut self, record: R);

    /// Borrow the record at `index`, or fail with `Index`
    fn get_by_index(&self, index: usize) -> VaultResult<&R>;

    /// Number of records
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Remove every record, keeping the name
    fn clear(&mut self);

    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);
}

/// How a decoded collection orders and deduplicates its records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageOrdering {
    /// Insertion order, duplicates allowed
    #[default]
    List,
    /// One record per key, ascending key order
    Keyed,
}

impl fmt::Display for StorageOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOrdering::List => write!(f, "list"),
            StorageOrdering::Keyed => write!(f, "keyed"),
        }
    }
}

/// A collection store of either ordering
#[derive(Debug, Clone)]
pub enum Store<R: Record> {
    List(ListStore<R>),
    Keyed(KeyedStore<R>),
}

impl<R: Record> Store<R> {
    /// Create an empty store named `default`
    pub fn new(ordering: StorageOrdering) -> Self {
        match ordering {
            StorageOrdering::List => Self::List(ListStore::new()),
            StorageOrdering::Keyed => Self::Keyed(KeyedStore::new()),
        }
    }

    pub fn ordering(&self) -> StorageOrdering {
        match self {
            Self::List(_) => StorageOrdering::List,
            Self::Keyed(_) => StorageOrdering::Keyed,
        }
    }

    /// Iterate records in index order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &R> + '_> {
        match self {
            Self::List(store) => Box::new(store.iter()),
            Self::Keyed(store) => Box::new(store.iter()),
        }
    }

    /// Collect records in index order
    pub fn to_vec(&self) -> Vec<R> {
        self.iter().cloned().collect()
    }
}

impl<R: Record> CollectionStore<R> for Store<R> {
    fn create(&mut self, record: R) {
        match self {
            Self::List(store) => store.create(record),
            Self::Keyed(store) => store.create(record),
        }
    }

    fn get_by_index(&self, index: usize) -> VaultResult<&R> {
        match self {
            Self::List(store) => store.get_by_index(index),
            Self::Keyed(store) => store.get_by_index(index),
        }
    }

    fn size(&self) -> usize {
        match self {
            Self::List(store) => store.size(),
            Self::Keyed(store) => store.size(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::List(store) => store.clear(),
            Self::Keyed(store) => store.clear(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::List(store) => store.name(),
            Self::Keyed(store) => store.name(),
        }
    }

    fn set_name(&mut self, name: &str) {
        match self {
            Self::List(store) => store.set_name(name),
            Self::Keyed(store) => store.set_name(name),
        }
    }
}
