//! # Storage Traits
//!
//! The seams between the flock store and the platform: a synchronous
//! key-value area for the serialized collections, and a place to keep photo
//! bytes that records only reference by name.

use std::sync::Arc;

use super::error::StoreResult;

/// A local key-value area holding opaque values
///
/// Each key is read and written independently; no transaction spans keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever written
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replace the value stored under `key`
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }
}

/// Storage for chick and hen photos
///
/// Records hold only the returned reference, never the image bytes.
pub trait ImageStorage: Send + Sync {
    /// Store image bytes and return the reference to keep on the record
    fn save(&self, bytes: &[u8]) -> StoreResult<String>;

    /// Load a previously saved image, `None` if the reference is unknown
    fn load(&self, reference: &str) -> StoreResult<Option<Vec<u8>>>;
}

/// Keys and image references become file names, so keep them plain
pub(crate) fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(super::error::StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("eggsKey").is_ok());
        assert!(validate_key("3f2a-b1.jpg").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
    }
}
