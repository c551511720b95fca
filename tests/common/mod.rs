//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use trustgate::domains::{TrustedDomainList, TrustedDomainStore, TRUSTED_DOMAINS_STORAGE_KEY};
use trustgate::storage::{InMemoryStorage, StorageScope, StorageService};

pub fn list(entries: &[&str]) -> TrustedDomainList {
    TrustedDomainList::from(entries)
}

/// In-memory storage, optionally seeded with raw stored text
pub fn storage_with(stored: Option<&str>) -> Arc<InMemoryStorage> {
    let storage = Arc::new(InMemoryStorage::new());
    if let Some(text) = stored {
        storage
            .store(TRUSTED_DOMAINS_STORAGE_KEY, text, StorageScope::Global)
            .expect("in-memory store never fails");
    }
    storage
}

pub fn store_over(
    storage: Arc<InMemoryStorage>,
    defaults: Option<&[&str]>,
) -> TrustedDomainStore {
    TrustedDomainStore::new(storage, defaults.map(TrustedDomainList::from))
}

/// Raw stored text under the trusted domain key
pub fn raw_stored(storage: &dyn StorageService) -> Option<String> {
    storage
        .get(TRUSTED_DOMAINS_STORAGE_KEY, StorageScope::Global)
        .expect("storage read")
}
