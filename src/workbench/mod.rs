//! Workbench wiring
//!
//! Every registry and service is built once in [`Workbench::new`]; nothing is
//! looked up by name at runtime.

pub mod commands;
pub mod editors;
pub mod extension_point;

pub use commands::{CommandDescriptor, CommandRegistry};
pub use editors::{CustomEditorInfo, CustomEditorService, EditorDescriptor, EditorRegistry};
pub use extension_point::{
    CollectReport, CustomEditorDiscretion, ExtensionPoint, ExtensionPointDescriptor,
    ExtensionsRegistry, WebviewEditorContribution,
};

use crate::config::{
    ConfigurationNode, ConfigurationProperty, ConfigurationRegistry, ProductConfig, PropertyType,
};
use crate::domains::{TrustedDomainService, CONFIGURE_TRUSTED_DOMAINS_COMMAND};
use crate::storage::StorageService;
use crate::Result;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Configuration key for per-resource custom editor associations
pub const CUSTOM_EDITOR_SETTING: &str = "workbench.editor.custom";

/// The assembled workbench
pub struct Workbench {
    extensions: ExtensionsRegistry,
    webview_editors: ExtensionPoint<WebviewEditorContribution>,
    editors: EditorRegistry,
    custom_editors: CustomEditorService,
    configuration: ConfigurationRegistry,
    commands: CommandRegistry,
    trusted_domains: TrustedDomainService,
}

impl Workbench {
    pub fn new(product: ProductConfig, storage: Arc<dyn StorageService>) -> Result<Self> {
        let mut extensions = ExtensionsRegistry::new();
        extensions.register_extension_point(ExtensionPointDescriptor {
            name: extension_point::WEBVIEW_EDITORS_POINT.to_string(),
            description: "Contributes webview editors.".to_string(),
            deps: vec![extension_point::LANGUAGES_POINT.to_string()],
        })?;

        let mut editor_registry = EditorRegistry::new();
        editor_registry.register_editor(EditorDescriptor {
            id: editors::CUSTOM_EDITOR_ID.to_string(),
            name: "Custom Editor".to_string(),
            inputs: vec![editors::CUSTOM_FILE_EDITOR_INPUT.to_string()],
        })?;

        let mut configuration = ConfigurationRegistry::new();
        configuration.register_configuration(workbench_configuration())?;

        let mut commands = CommandRegistry::new();
        commands.register_command(CommandDescriptor {
            id: CONFIGURE_TRUSTED_DOMAINS_COMMAND.to_string(),
            description: "Configure Trusted Domains Settings for Link Protection".to_string(),
        })?;

        let trusted_domains = TrustedDomainService::new(
            storage,
            product.default_trusted_domains(),
            product.strict_add,
        );

        info!("Workbench ready for {}", product.display_name());

        Ok(Self {
            extensions,
            webview_editors: ExtensionPoint::new(extension_point::WEBVIEW_EDITORS_POINT),
            editors: editor_registry,
            custom_editors: CustomEditorService::new(),
            configuration,
            commands,
            trusted_domains,
        })
    }

    /// Collect an extension manifest's contributions
    pub fn add_extension(&mut self, extension_id: &str, manifest: &Value) -> CollectReport {
        let report = self.webview_editors.collect(extension_id, manifest);
        if report.accepted > 0 {
            self.custom_editors
                .update(self.webview_editors.contributions());
        }
        report
    }

    pub fn extensions(&self) -> &ExtensionsRegistry {
        &self.extensions
    }

    pub fn editors(&self) -> &EditorRegistry {
        &self.editors
    }

    pub fn custom_editors(&self) -> &CustomEditorService {
        &self.custom_editors
    }

    pub fn configuration(&self) -> &ConfigurationRegistry {
        &self.configuration
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn trusted_domains(&self) -> &TrustedDomainService {
        &self.trusted_domains
    }
}

fn workbench_configuration() -> ConfigurationNode {
    ConfigurationNode {
        id: "workbench".to_string(),
        order: 7,
        title: "Workbench".to_string(),
        properties: BTreeMap::from([(
            CUSTOM_EDITOR_SETTING.to_string(),
            ConfigurationProperty {
                property_type: PropertyType::Object,
                description: "Configures which custom editor to use for a resource.".to_string(),
                default: json!({}),
            },
        )]),
    }
}
