use super::extension_point::{Contributed, CustomEditorDiscretion, WebviewEditorContribution};
use crate::{Result, TrustgateError};
use std::collections::BTreeMap;
use tracing::debug;

/// Id of the editor that hosts contributed webview editors
pub const CUSTOM_EDITOR_ID: &str = "workbench.editors.customEditor";

/// Input type opened by the custom editor
pub const CUSTOM_FILE_EDITOR_INPUT: &str = "CustomFileEditorInput";

/// An editor pane type and the inputs it can open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDescriptor {
    pub id: String,
    pub name: String,
    pub inputs: Vec<String>,
}

/// Registered editor pane types
#[derive(Debug, Default)]
pub struct EditorRegistry {
    editors: Vec<EditorDescriptor>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_editor(&mut self, descriptor: EditorDescriptor) -> Result<()> {
        if self.get(&descriptor.id).is_some() {
            return Err(TrustgateError::Registry(format!(
                "editor '{}' is already registered",
                descriptor.id
            )));
        }
        debug!(id = %descriptor.id, inputs = ?descriptor.inputs, "Registered editor");
        self.editors.push(descriptor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EditorDescriptor> {
        self.editors.iter().find(|editor| editor.id == id)
    }

    pub fn editors(&self) -> &[EditorDescriptor] {
        &self.editors
    }
}

/// A contributed custom editor known to the workbench
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEditorInfo {
    pub view_type: String,
    pub display_name: String,
    pub filename_patterns: Vec<String>,
    pub discretion: CustomEditorDiscretion,
    pub extension_id: String,
}

/// Custom editors contributed by extensions, keyed by view type
#[derive(Debug, Default)]
pub struct CustomEditorService {
    editors: BTreeMap<String, CustomEditorInfo>,
}

impl CustomEditorService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the known editors with the current contributions
    pub fn update(&mut self, contributions: &[Contributed<WebviewEditorContribution>]) {
        self.editors = contributions
            .iter()
            .map(|c| {
                (
                    c.value.view_type.clone(),
                    CustomEditorInfo {
                        view_type: c.value.view_type.clone(),
                        display_name: c.value.display_name.clone(),
                        filename_patterns: c.value.filename_patterns.clone(),
                        discretion: c.value.discretion,
                        extension_id: c.extension_id.clone(),
                    },
                )
            })
            .collect();
    }

    pub fn get(&self, view_type: &str) -> Option<&CustomEditorInfo> {
        self.editors.get(view_type)
    }

    pub fn editors(&self) -> impl Iterator<Item = &CustomEditorInfo> {
        self.editors.values()
    }
}
