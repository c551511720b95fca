use crate::{Result, TrustgateError};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// JSON type of a configuration property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Boolean,
    Number,
    Array,
    Object,
}

/// One configuration property and its default
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationProperty {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: String,
    pub default: Value,
}

/// A titled group of configuration properties
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationNode {
    pub id: String,
    pub order: u32,
    pub title: String,
    pub properties: BTreeMap<String, ConfigurationProperty>,
}

/// Registered configuration nodes
#[derive(Debug, Default)]
pub struct ConfigurationRegistry {
    nodes: Vec<ConfigurationNode>,
}

impl ConfigurationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node; property keys must be unique across all nodes
    pub fn register_configuration(&mut self, node: ConfigurationNode) -> Result<()> {
        for key in node.properties.keys() {
            if self.property(key).is_some() {
                return Err(TrustgateError::Registry(format!(
                    "configuration property '{key}' is already registered"
                )));
            }
        }

        debug!(id = %node.id, properties = node.properties.len(), "Registered configuration");
        self.nodes.push(node);
        Ok(())
    }

    /// Nodes ordered by `order`, then registration
    pub fn nodes(&self) -> Vec<&ConfigurationNode> {
        let mut nodes: Vec<_> = self.nodes.iter().collect();
        nodes.sort_by_key(|node| node.order);
        nodes
    }

    pub fn property(&self, key: &str) -> Option<&ConfigurationProperty> {
        self.nodes.iter().find_map(|node| node.properties.get(key))
    }

    /// Every property key mapped to its default value
    pub fn defaults(&self) -> BTreeMap<String, Value> {
        self.nodes
            .iter()
            .flat_map(|node| node.properties.iter())
            .map(|(key, property)| (key.clone(), property.default.clone()))
            .collect()
    }
}
