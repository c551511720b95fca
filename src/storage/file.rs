use super::{StorageScope, StorageService};
use crate::{Result, TrustgateError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, trace, warn};

/// On-disk layout of one scope file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScopeFile {
    entries: BTreeMap<String, StoredValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    updated_at: DateTime<Utc>,
}

/// Manages scope files (`global.json`, `workspace.json`) in a storage directory
pub struct JsonFileStorage {
    /// Directory holding one JSON file per scope
    storage_dir: PathBuf,
    /// Serializes read-modify-write of scope files within this instance
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Create new file storage for the given directory
    pub fn new(storage_dir: &Path) -> Result<Self> {
        if !storage_dir.exists() {
            fs::create_dir_all(storage_dir)?;
        }

        Ok(Self {
            storage_dir: storage_dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the file backing a scope
    pub fn scope_file_path(&self, scope: StorageScope) -> PathBuf {
        self.storage_dir.join(format!("{}.json", scope.as_str()))
    }

    /// Load a scope file from disk, or start empty
    fn load_scope(&self, scope: StorageScope) -> Result<ScopeFile> {
        let file_path = self.scope_file_path(scope);

        if !file_path.exists() {
            trace!("No storage file at {}", file_path.display());
            return Ok(ScopeFile::default());
        }

        let content = fs::read_to_string(&file_path)?;
        match serde_json::from_str(&content) {
            Ok(file) => Ok(file),
            Err(e) => {
                // A damaged scope file is replaced on the next write
                warn!(
                    "Ignoring unreadable storage file {}: {}",
                    file_path.display(),
                    e
                );
                Ok(ScopeFile::default())
            }
        }
    }

    /// Write a scope file through a temp file and rename
    fn save_scope(&self, scope: StorageScope, file: &ScopeFile) -> Result<()> {
        let file_path = self.scope_file_path(scope);
        let tmp_path = file_path.with_extension("json.tmp");

        let content = serde_json::to_string_pretty(file)?;
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &file_path)?;

        debug!("Saved {} storage to {}", scope.as_str(), file_path.display());
        Ok(())
    }
}

impl StorageService for JsonFileStorage {
    fn get(&self, key: &str, scope: StorageScope) -> Result<Option<String>> {
        // Always from disk; other instances may have written since
        let file = self.load_scope(scope)?;
        Ok(file.entries.get(key).map(|stored| stored.value.clone()))
    }

    fn store(&self, key: &str, value: &str, scope: StorageScope) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| TrustgateError::Storage("storage write lock poisoned".to_string()))?;

        let mut file = self.load_scope(scope)?;
        file.entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        self.save_scope(scope, &file)
    }
}
