use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::storage::error::StoreResult;
use crate::storage::traits::{validate_key, KeyValueStore};

/// File-backed key-value store: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    /// Open a store rooted at `directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(directory: P) -> StoreResult<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory)?;
            debug!("Created store directory {}", directory.display());
        }

        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let path = self.value_path(key);

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Err(e.into())
            }
        }
    }

    /// Writes to a sibling temp file and renames it over the old value, so a
    /// crash leaves either the old or the new value for this key
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        validate_key(key)?;
        let path = self.value_path(key);
        let temp_path = self.directory.join(format!("{}.json.tmp", key));

        if let Err(e) = fs::write(&temp_path, value).and_then(|_| fs::rename(&temp_path, &path)) {
            warn!("Failed to write {}: {}", path.display(), e);
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StoreError;
    use tempfile::TempDir;

    fn setup_test_store() -> (FileKeyValueStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileKeyValueStore::new(temp_dir.path()).expect("Failed to create store");
        (store, temp_dir)
    }

    #[test]
    fn test_get_absent_key() {
        let (store, _temp_dir) = setup_test_store();
        assert!(store.get("eggsKey").unwrap().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let (store, temp_dir) = setup_test_store();

        store.put("hensKey", b"[{\"name\":\"Goldie\"}]").unwrap();

        assert_eq!(store.get("hensKey").unwrap(), Some(b"[{\"name\":\"Goldie\"}]".to_vec()));
        assert!(temp_dir.path().join("hensKey.json").exists());
        assert!(!temp_dir.path().join("hensKey.json.tmp").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let (store, temp_dir) = setup_test_store();
        store.put("envKey", b"{\"temperature\":38.0,\"humidity\":60.0}").unwrap();
        drop(store);

        let reopened = FileKeyValueStore::new(temp_dir.path()).unwrap();
        assert_eq!(
            reopened.get("envKey").unwrap(),
            Some(b"{\"temperature\":38.0,\"humidity\":60.0}".to_vec())
        );
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let store = FileKeyValueStore::new(&nested).unwrap();
        store.put("logsKey", b"[]").unwrap();

        assert!(nested.join("logsKey.json").exists());
        assert_eq!(store.directory(), nested.as_path());
    }

    #[test]
    fn test_failed_replace_removes_temp_file() {
        let (store, temp_dir) = setup_test_store();
        // a directory in the way makes the rename fail
        fs::create_dir(temp_dir.path().join("eggsKey.json")).unwrap();

        let result = store.put("eggsKey", b"[]");

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(!temp_dir.path().join("eggsKey.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, _temp_dir) = setup_test_store();
        assert!(matches!(store.put("../outside", b"x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.get("a/b"), Err(StoreError::InvalidKey(_))));
    }
}
