use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::storage::error::StoreResult;
use crate::storage::traits::{validate_key, ImageStorage};

/// Photos saved as `<uuid>.jpg` files in a single directory
#[derive(Debug, Clone)]
pub struct FileImageStorage {
    directory: PathBuf,
}

impl FileImageStorage {
    pub fn new<P: AsRef<Path>>(directory: P) -> StoreResult<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory)?;
            info!("Created photo directory {}", directory.display());
        }

        Ok(Self { directory })
    }
}

impl ImageStorage for FileImageStorage {
    fn save(&self, bytes: &[u8]) -> StoreResult<String> {
        let file_name = format!("{}.jpg", Uuid::new_v4());
        fs::write(self.directory.join(&file_name), bytes)?;

        debug!("Saved photo {} ({} bytes)", file_name, bytes.len());
        Ok(file_name)
    }

    fn load(&self, reference: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(reference)?;

        match fs::read(self.directory.join(reference)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_photo() {
        let temp_dir = TempDir::new().unwrap();
        let images = FileImageStorage::new(temp_dir.path().join("photos")).unwrap();

        let reference = images.save(b"fake jpeg bytes").unwrap();

        assert!(temp_dir.path().join("photos").join(&reference).exists());
        assert_eq!(images.load(&reference).unwrap(), Some(b"fake jpeg bytes".to_vec()));
    }

    #[test]
    fn test_load_unknown_reference() {
        let temp_dir = TempDir::new().unwrap();
        let images = FileImageStorage::new(temp_dir.path()).unwrap();

        assert_eq!(images.load("nope.jpg").unwrap(), None);
        assert!(images.load("../secret").is_err());
    }

    #[test]
    fn test_each_save_gets_a_new_reference() {
        let temp_dir = TempDir::new().unwrap();
        let images = FileImageStorage::new(temp_dir.path()).unwrap();

        let a = images.save(b"a").unwrap();
        let b = images.save(b"a").unwrap();
        assert_ne!(a, b);
    }
}
