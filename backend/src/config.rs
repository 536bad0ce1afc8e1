//! Application configuration
//!
//! Settings live in `config.yaml` inside the data directory. The data directory
//! defaults to `~/Documents/Chicken Incubator` and can be moved with the
//! `INCUBATOR_DATA_DIR` environment variable. A missing config file means
//! defaults.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DATA_DIR_ENV: &str = "INCUBATOR_DATA_DIR";

const DEFAULT_FOLDER_NAME: &str = "Chicken Incubator";
const PHOTOS_FOLDER_NAME: &str = "photos";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the collection files are kept
    pub data_directory: PathBuf,
    /// Where photos are kept; `<data_directory>/photos` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos_directory: Option<PathBuf>,
}

impl AppConfig {
    /// Configuration that keeps everything under `directory`
    pub fn for_directory<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            data_directory: directory.as_ref().to_path_buf(),
            photos_directory: None,
        }
    }

    /// `~/Documents/Chicken Incubator`, or the `INCUBATOR_DATA_DIR` override
    pub fn default_base_directory() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .context("Could not determine home directory")?;
        Ok(documents_dir.join(DEFAULT_FOLDER_NAME))
    }

    /// Load configuration from the default base directory
    pub fn load_default() -> Result<Self> {
        let base = Self::default_base_directory()?;
        Self::load_from(&base)
    }

    /// Load `config.yaml` from `base`
    ///
    /// Relative paths in the file are resolved against `base`.
    pub fn load_from<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref();
        let path = base.join(CONFIG_FILE_NAME);

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::for_directory(base));
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.data_directory = resolve(base, &config.data_directory);
        config.photos_directory = config.photos_directory.map(|dir| resolve(base, &dir));
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write this configuration as `config.yaml` in `base`
    pub fn save_to<P: AsRef<Path>>(&self, base: P) -> Result<()> {
        let base = base.as_ref();
        fs::create_dir_all(base)
            .with_context(|| format!("Failed to create directory {}", base.display()))?;

        let path = base.join(CONFIG_FILE_NAME);
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config")?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    pub fn photos_directory(&self) -> PathBuf {
        self.photos_directory
            .clone()
            .unwrap_or_else(|| self.data_directory.join(PHOTOS_FOLDER_NAME))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
