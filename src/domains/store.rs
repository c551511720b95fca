use super::list::TrustedDomainList;
use crate::storage::{StorageScope, StorageService};
use crate::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Storage key of the persisted trusted-domain list
pub const TRUSTED_DOMAINS_STORAGE_KEY: &str = "http.linkProtectionTrustedDomains";

/// Where the current list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainSource {
    /// Parsed from storage
    Stored,
    /// Nothing usable stored; product defaults apply
    ProductDefault,
    /// Nothing usable stored and no product defaults
    Empty,
}

/// Owns the persisted trusted-domain list
pub struct TrustedDomainStore {
    storage: Arc<dyn StorageService>,
    defaults: Option<TrustedDomainList>,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl TrustedDomainStore {
    pub fn new(storage: Arc<dyn StorageService>, defaults: Option<TrustedDomainList>) -> Self {
        Self {
            storage,
            defaults,
            write_lock: Mutex::new(()),
        }
    }

    /// Product-supplied defaults, if configured
    pub fn defaults(&self) -> Option<&TrustedDomainList> {
        self.defaults.as_ref()
    }

    /// Current list without taking the write lock
    pub fn read(&self) -> Result<(TrustedDomainList, DomainSource)> {
        let stored = self
            .storage
            .get(TRUSTED_DOMAINS_STORAGE_KEY, StorageScope::Global)?;

        if let Some(text) = stored.filter(|text| !text.is_empty()) {
            match TrustedDomainList::from_json(&text) {
                Ok(list) => return Ok((list, DomainSource::Stored)),
                // Corrupt state degrades to "nothing stored"
                Err(e) => debug!("Ignoring unparsable trusted domains: {}", e),
            }
        }

        Ok(match &self.defaults {
            Some(defaults) => (defaults.clone(), DomainSource::ProductDefault),
            None => (TrustedDomainList::default(), DomainSource::Empty),
        })
    }

    /// Start a read-modify-write cycle
    ///
    /// Other transactions on this store wait until the returned one is
    /// committed or dropped.
    pub async fn transaction(&self) -> Result<DomainTransaction<'_>> {
        let guard = self.write_lock.lock().await;
        let (current, source) = self.read()?;
        debug!(entries = current.len(), ?source, "Opened trusted domain transaction");

        Ok(DomainTransaction {
            _guard: guard,
            store: self,
            current,
            source,
        })
    }

    fn write(&self, list: &TrustedDomainList) -> Result<()> {
        let text = list.to_json()?;
        self.storage
            .store(TRUSTED_DOMAINS_STORAGE_KEY, &text, StorageScope::Global)?;
        info!(entries = list.len(), "Stored trusted domains");
        Ok(())
    }
}

/// A locked view of the list; dropping it without committing changes nothing
pub struct DomainTransaction<'a> {
    _guard: MutexGuard<'a, ()>,
    store: &'a TrustedDomainStore,
    current: TrustedDomainList,
    source: DomainSource,
}

impl<'a> DomainTransaction<'a> {
    pub fn current(&self) -> &TrustedDomainList {
        &self.current
    }

    pub fn source(&self) -> DomainSource {
        self.source
    }

    pub fn defaults(&self) -> Option<&TrustedDomainList> {
        self.store.defaults()
    }

    /// Persist `list` and release the lock
    pub fn commit(self, list: &TrustedDomainList) -> Result<()> {
        self.store.write(list)
    }
}
