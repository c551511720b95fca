use crate::{Result, TrustgateError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name of the product defaults inside the config directory
pub const PRODUCT_CONFIG_FILE: &str = "product.yaml";

/// Path management for trustgate configuration and storage files
#[derive(Debug, Clone)]
pub struct TrustgatePaths {
    /// Configuration directory (product.yaml)
    pub config_dir: PathBuf,
    /// Storage directory (global.json, workspace.json)
    pub storage_dir: PathBuf,
}

impl TrustgatePaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "trustgate").ok_or_else(|| {
            TrustgateError::Path("Failed to determine project directories".to_string())
        })?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            storage_dir: dirs.data_dir().join("storage"),
        })
    }

    /// Create paths rooted at a single directory
    pub fn for_root(root: &Path) -> Self {
        let config_dir = root.join(".trustgate");
        let storage_dir = config_dir.join("storage");
        Self {
            config_dir,
            storage_dir,
        }
    }

    /// Replace the storage directory (e.g. from `--storage-dir`)
    pub fn with_storage_dir(mut self, storage_dir: PathBuf) -> Self {
        self.storage_dir = storage_dir;
        self
    }

    /// Default product config file path
    pub fn product_config_file(&self) -> PathBuf {
        self.config_dir.join(PRODUCT_CONFIG_FILE)
    }

}
