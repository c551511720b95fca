//! Scoped key/value text storage
//!
//! Storage is the only place trusted-domain state lives between invocations.
//! Values are opaque text; callers own the encoding.

pub mod file;

pub use file::JsonFileStorage;

use crate::{Result, TrustgateError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Visibility of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Spans the whole application instance
    Global,
    /// Tied to the current workspace
    Workspace,
}

impl StorageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Global => "global",
            StorageScope::Workspace => "workspace",
        }
    }
}

/// Key/value text store
pub trait StorageService: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str, scope: StorageScope) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn store(&self, key: &str, value: &str, scope: StorageScope) -> Result<()>;
}

/// Process-local storage, lost on exit
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    values: Mutex<HashMap<(StorageScope, String), String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageService for InMemoryStorage {
    fn get(&self, key: &str, scope: StorageScope) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| TrustgateError::Storage("in-memory storage lock poisoned".to_string()))?;
        Ok(values.get(&(scope, key.to_string())).cloned())
    }

    fn store(&self, key: &str, value: &str, scope: StorageScope) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| TrustgateError::Storage("in-memory storage lock poisoned".to_string()))?;
        values.insert((scope, key.to_string()), value.to_string());
        Ok(())
    }
}
