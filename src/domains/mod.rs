//! Trusted domains for link protection
//!
//! Opening a link to a trusted domain skips the confirmation prompt. The list
//! lives in global storage as a JSON array; product defaults apply while
//! nothing usable is stored.

pub mod flow;
pub mod list;
pub mod store;
pub mod validation;

pub use flow::{ConfigureTrustedDomainAction, FlowOutcome, TrustDecisionFlow};
pub use list::{TrustedDomainList, WILDCARD};
pub use store::{DomainSource, TrustedDomainStore, TRUSTED_DOMAINS_STORAGE_KEY};
pub use validation::validate_domain_input;

use crate::quickinput::QuickInputService;
use crate::storage::StorageService;
use crate::Result;
use std::sync::Arc;

/// Command id of the trusted domain settings flow
pub const CONFIGURE_TRUSTED_DOMAINS_COMMAND: &str =
    "workbench.action.configureTrustedDomainSettings";

/// Trusted domain operations exposed to the rest of the workbench
pub struct TrustedDomainService {
    store: TrustedDomainStore,
    strict_add: bool,
}

impl TrustedDomainService {
    pub fn new(
        storage: Arc<dyn StorageService>,
        defaults: Option<TrustedDomainList>,
        strict_add: bool,
    ) -> Self {
        Self {
            store: TrustedDomainStore::new(storage, defaults),
            strict_add,
        }
    }

    pub fn store(&self) -> &TrustedDomainStore {
        &self.store
    }

    /// Current list and where it came from
    pub fn current(&self) -> Result<(TrustedDomainList, DomainSource)> {
        self.store.read()
    }

    /// Whether opening `url` may skip the confirmation prompt
    pub fn is_trusted(&self, url: &str) -> Result<bool> {
        Ok(self.store.read()?.0.is_trusted(url))
    }

    /// Run the configure flow once with the given prompt front-end
    pub async fn configure(&self, quick_input: &dyn QuickInputService) -> Result<FlowOutcome> {
        TrustDecisionFlow::new(&self.store, quick_input)
            .with_strict_add(self.strict_add)
            .run()
            .await
    }
}
