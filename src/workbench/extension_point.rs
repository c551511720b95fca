//! Extension points and the `webviewEditors` contribution
//!
//! Manifests list contributions under `contributes.<point>`. Each entry is
//! deserialized on its own so one bad entry does not drop its siblings.

use crate::{Result, TrustgateError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Name of the webview editor extension point
pub const WEBVIEW_EDITORS_POINT: &str = "webviewEditors";

/// Name of the languages extension point it depends on
pub const LANGUAGES_POINT: &str = "languages";

/// When a contributed custom editor is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomEditorDiscretion {
    /// Used automatically unless another default custom editor claims the resource
    #[default]
    Default,
    /// Never used automatically; the user can select it
    Option,
}

/// One entry of `contributes.webviewEditors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebviewEditorContribution {
    /// Unique identifier of the custom editor
    pub view_type: String,
    /// Name of the custom editor displayed to users
    pub display_name: String,
    /// Globs the custom editor is enabled for
    #[serde(default)]
    pub filename_patterns: Vec<String>,
    #[serde(default)]
    pub discretion: CustomEditorDiscretion,
}

/// A typed contribution to an extension point
pub trait Contribution: DeserializeOwned {
    /// Key that must be unique across all extensions
    fn key(&self) -> &str;

    /// Checks serde cannot express
    fn check(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

impl Contribution for WebviewEditorContribution {
    fn key(&self) -> &str {
        &self.view_type
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.view_type.trim().is_empty() {
            return Err("viewType must not be empty".to_string());
        }
        for pattern in &self.filename_patterns {
            glob::Pattern::new(pattern)
                .map_err(|e| format!("invalid filename pattern '{pattern}': {e}"))?;
        }
        Ok(())
    }
}

/// Declared extension point metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPointDescriptor {
    pub name: String,
    pub description: String,
    pub deps: Vec<String>,
}

/// Names and dependencies of every declared extension point
#[derive(Debug, Default)]
pub struct ExtensionsRegistry {
    points: BTreeMap<String, ExtensionPointDescriptor>,
}

impl ExtensionsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_extension_point(&mut self, descriptor: ExtensionPointDescriptor) -> Result<()> {
        if self.points.contains_key(&descriptor.name) {
            return Err(TrustgateError::Registry(format!(
                "extension point '{}' is already registered",
                descriptor.name
            )));
        }
        debug!(point = %descriptor.name, deps = ?descriptor.deps, "Registered extension point");
        self.points.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ExtensionPointDescriptor> {
        self.points.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }
}

/// A contribution accepted from one extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributed<T> {
    pub extension_id: String,
    pub value: T,
}

/// Problem with one contribution entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionIssue {
    pub extension_id: String,
    pub index: usize,
    pub message: String,
}

/// What happened when a manifest was collected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub accepted: usize,
    pub issues: Vec<ContributionIssue>,
}

/// Contributions gathered for one extension point
#[derive(Debug)]
pub struct ExtensionPoint<T> {
    name: String,
    contributions: Vec<Contributed<T>>,
}

impl<T: Contribution> ExtensionPoint<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contributions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contributions(&self) -> &[Contributed<T>] {
        &self.contributions
    }

    /// Read `contributes.<name>` from an extension manifest
    ///
    /// A manifest without the key contributes nothing. A value that is not an
    /// array is reported as a single issue.
    pub fn collect(&mut self, extension_id: &str, manifest: &Value) -> CollectReport {
        let mut report = CollectReport::default();

        let Some(raw) = manifest.get("contributes").and_then(|c| c.get(&self.name)) else {
            return report;
        };

        let Some(entries) = raw.as_array() else {
            report.issues.push(ContributionIssue {
                extension_id: extension_id.to_string(),
                index: 0,
                message: format!("contributes.{} must be an array", self.name),
            });
            return report;
        };

        let mut seen: HashSet<String> = self
            .contributions
            .iter()
            .map(|c| c.value.key().to_string())
            .collect();

        for (index, entry) in entries.iter().enumerate() {
            let issue = |message: String| ContributionIssue {
                extension_id: extension_id.to_string(),
                index,
                message,
            };

            let value = match serde_json::from_value::<T>(entry.clone()) {
                Ok(value) => value,
                Err(e) => {
                    report.issues.push(issue(e.to_string()));
                    continue;
                }
            };

            if let Err(message) = value.check() {
                report.issues.push(issue(message));
                continue;
            }

            if !seen.insert(value.key().to_string()) {
                report
                    .issues
                    .push(issue(format!("'{}' is already contributed", value.key())));
                continue;
            }

            self.contributions.push(Contributed {
                extension_id: extension_id.to_string(),
                value,
            });
            report.accepted += 1;
        }

        for issue in &report.issues {
            warn!(
                "Skipping {}[{}] from {}: {}",
                self.name, issue.index, issue.extension_id, issue.message
            );
        }
        report
    }
}
