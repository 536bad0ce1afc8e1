use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use super::traits::{validate_key, ImageStorage, KeyValueStore};

/// In-memory key-value store for tests and embedding
///
/// Can be switched to read-only to simulate a platform that rejects writes.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
    read_only: AtomicBool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject (or accept again) every subsequent `put`
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Number of keys currently holding a value
    pub fn len(&self) -> usize {
        self.values.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let values = self.values.read().expect("lock poisoned");
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        let mut values = self.values.write().expect("lock poisoned");
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// In-memory photo storage for tests
#[derive(Debug, Default)]
pub struct InMemoryImageStorage {
    images: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageStorage for InMemoryImageStorage {
    fn save(&self, bytes: &[u8]) -> StoreResult<String> {
        let reference = format!("{}.jpg", Uuid::new_v4());
        let mut images = self.images.write().expect("lock poisoned");
        images.insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    fn load(&self, reference: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(reference)?;
        let images = self.images.read().expect("lock poisoned");
        Ok(images.get(reference).cloned())
    }
}
