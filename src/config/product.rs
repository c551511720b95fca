use crate::domains::TrustedDomainList;
use crate::{Result, TrustgateError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Product-level settings shipped with the application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Product name shown in messages
    #[serde(default)]
    pub name: Option<String>,

    /// Default trusted domains for link protection
    #[serde(default)]
    pub link_protection_trusted_domains: Option<Vec<String>>,

    /// Block add-domain input that is not an http(s) URL
    #[serde(default)]
    pub strict_add: bool,
}

impl ProductConfig {
    /// Load product config, or the built-in defaults if the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No product config at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            TrustgateError::Config(format!(
                "Failed to parse product config {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to nothing rather than to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Default trusted domains, if the product configures any
    pub fn default_trusted_domains(&self) -> Option<TrustedDomainList> {
        self.link_protection_trusted_domains
            .clone()
            .map(TrustedDomainList::from)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("trustgate")
    }
}
