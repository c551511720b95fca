//! Trusted domain decision flow
//!
//! One invocation shows the four actions, runs at most one of them and
//! persists the resulting list:
//! - toggle "open all links without prompt" (the wildcard entry)
//! - add a trusted domain
//! - review and prune the trusted domains
//! - reset to the product defaults

use super::list::TrustedDomainList;
use super::store::TrustedDomainStore;
use super::validation::{
    validate_domain_input, ADD_DOMAIN_PLACEHOLDER, ADD_DOMAIN_VALIDATION_MESSAGE,
};
use crate::quickinput::{InputOptions, QuickInputService, QuickPickItem};
use crate::{Result, TrustgateError};
use tracing::{debug, info, warn};

/// The four actions offered by the flow, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureTrustedDomainAction {
    ToggleAll,
    Add,
    Configure,
    Reset,
}

impl ConfigureTrustedDomainAction {
    pub const ALL: [ConfigureTrustedDomainAction; 4] = [
        ConfigureTrustedDomainAction::ToggleAll,
        ConfigureTrustedDomainAction::Add,
        ConfigureTrustedDomainAction::Configure,
        ConfigureTrustedDomainAction::Reset,
    ];

    /// Stable id used for pick items
    pub fn id(&self) -> &'static str {
        match self {
            ConfigureTrustedDomainAction::ToggleAll => "toggleAll",
            ConfigureTrustedDomainAction::Add => "add",
            ConfigureTrustedDomainAction::Configure => "configure",
            ConfigureTrustedDomainAction::Reset => "reset",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    /// Menu label; the toggle label depends on the current list
    pub fn label(&self, current: &TrustedDomainList) -> &'static str {
        match self {
            ConfigureTrustedDomainAction::ToggleAll if current.has_wildcard() => {
                "Open all links with prompt"
            }
            ConfigureTrustedDomainAction::ToggleAll => "Open all links without prompt",
            ConfigureTrustedDomainAction::Add => "Add Trusted Domain",
            ConfigureTrustedDomainAction::Configure => "View and configure Trusted Domains",
            ConfigureTrustedDomainAction::Reset => "Reset Trusted Domains",
        }
    }
}

/// Result of one flow invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// A prompt was dismissed; nothing persisted
    Cancelled,
    /// An action ran but had nothing to persist
    Unchanged,
    /// The list was persisted
    Persisted(TrustedDomainList),
}

/// Add the wildcard if absent, drop every copy of it otherwise
pub fn toggle_all(current: &TrustedDomainList) -> TrustedDomainList {
    if current.has_wildcard() {
        current.without_wildcard()
    } else {
        current.with_wildcard()
    }
}

/// The decision flow over one store and one prompt front-end
pub struct TrustDecisionFlow<'a> {
    store: &'a TrustedDomainStore,
    quick_input: &'a dyn QuickInputService,
    /// Block add-domain input that fails validation
    strict_add: bool,
}

impl<'a> TrustDecisionFlow<'a> {
    pub fn new(store: &'a TrustedDomainStore, quick_input: &'a dyn QuickInputService) -> Self {
        Self {
            store,
            quick_input,
            strict_add: false,
        }
    }

    pub fn with_strict_add(mut self, strict_add: bool) -> Self {
        self.strict_add = strict_add;
        self
    }

    /// Run one invocation of the flow
    pub async fn run(&self) -> Result<FlowOutcome> {
        let tx = self.store.transaction().await?;
        let current = tx.current().clone();

        let items = ConfigureTrustedDomainAction::ALL
            .iter()
            .map(|action| QuickPickItem::new(action.id(), action.label(&current)))
            .collect();

        let Some(selected) = self.quick_input.pick(items).await? else {
            debug!("Trusted domain action prompt dismissed");
            return Ok(FlowOutcome::Cancelled);
        };

        let action = ConfigureTrustedDomainAction::from_id(&selected.id).ok_or_else(|| {
            TrustgateError::QuickInput(format!("unknown trusted domain action '{}'", selected.id))
        })?;
        debug!(?action, "Trusted domain action selected");

        let next = match action {
            ConfigureTrustedDomainAction::ToggleAll => Some(toggle_all(&current)),
            ConfigureTrustedDomainAction::Add => match self.add_domain(&current).await? {
                AddResult::Cancelled => return Ok(FlowOutcome::Cancelled),
                AddResult::Blocked => None,
                AddResult::Added(next) => Some(next),
            },
            ConfigureTrustedDomainAction::Configure => {
                match self.configure_domains(&current).await? {
                    Some(next) => Some(next),
                    None => return Ok(FlowOutcome::Cancelled),
                }
            }
            ConfigureTrustedDomainAction::Reset => match tx.defaults() {
                Some(defaults) => Some(defaults.clone()),
                None => {
                    debug!("No product trusted domains configured; reset skipped");
                    None
                }
            },
        };

        match next {
            Some(next) => {
                tx.commit(&next)?;
                info!(?action, entries = next.len(), "Trusted domains updated");
                Ok(FlowOutcome::Persisted(next))
            }
            None => Ok(FlowOutcome::Unchanged),
        }
    }

    async fn add_domain(&self, current: &TrustedDomainList) -> Result<AddResult> {
        let options = InputOptions {
            placeholder: ADD_DOMAIN_PLACEHOLDER.to_string(),
            validate: Some(validate_domain_input),
            validation_message: Some(ADD_DOMAIN_VALIDATION_MESSAGE.to_string()),
        };

        let Some(text) = self.quick_input.input(options).await? else {
            return Ok(AddResult::Cancelled);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(AddResult::Cancelled);
        }

        let validation = validate_domain_input(text);
        let entry = match validation.normalized {
            Some(normalized) => normalized,
            None if self.strict_add => {
                warn!("Not adding '{}': expected an http:// or https:// URL", text);
                return Ok(AddResult::Blocked);
            }
            None => {
                warn!("Adding '{}' although it is not an http(s) URL", text);
                text.to_string()
            }
        };

        Ok(AddResult::Added(current.appended(&entry)))
    }

    async fn configure_domains(
        &self,
        current: &TrustedDomainList,
    ) -> Result<Option<TrustedDomainList>> {
        let items = current
            .domains()
            .enumerate()
            .map(|(index, domain)| QuickPickItem::new(index.to_string(), domain).picked(true))
            .collect();

        let Some(picked) = self.quick_input.pick_many(items).await? else {
            return Ok(None);
        };

        let kept = picked
            .iter()
            .map(|item| {
                item.id.parse::<usize>().map_err(|_| {
                    TrustgateError::QuickInput(format!("unexpected domain item id '{}'", item.id))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(current.retain_domains(&kept)))
    }
}

enum AddResult {
    Cancelled,
    Blocked,
    Added(TrustedDomainList),
}
