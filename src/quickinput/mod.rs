//! Quick input prompts
//!
//! The trusted domain flow only talks to [`QuickInputService`]. Front-ends:
//! - [`TerminalQuickInput`]: numbered menus over stdin/stdout
//! - [`ScriptedQuickInput`]: pre-recorded answers (non-interactive CLI, tests)
//! - `cli::tui::TuiQuickInput`: full-screen picker behind the `tui` feature

pub mod scripted;
pub mod terminal;

pub use scripted::{ScriptedAnswer, ScriptedQuickInput, ShownPrompt};
pub use terminal::TerminalQuickInput;

use crate::Result;
use async_trait::async_trait;

/// One entry in a pick list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPickItem {
    pub id: String,
    pub label: String,
    /// Pre-checked state for multi-select
    pub picked: bool,
}

impl QuickPickItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            picked: false,
        }
    }

    pub fn picked(mut self, picked: bool) -> Self {
        self.picked = picked;
        self
    }
}

/// Outcome of validating free-text input
///
/// `valid == false` flags the text for the user; whether it is blocked is up
/// to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValidation {
    pub valid: bool,
    pub normalized: Option<String>,
}

impl InputValidation {
    pub fn accepted(value: impl Into<String>) -> Self {
        Self {
            valid: true,
            normalized: Some(value.into()),
        }
    }

    pub fn flagged() -> Self {
        Self {
            valid: false,
            normalized: None,
        }
    }
}

/// Validator callback for free-text prompts
pub type InputValidator = fn(&str) -> InputValidation;

/// Options for a free-text prompt
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    pub placeholder: String,
    pub validate: Option<InputValidator>,
    /// Shown next to the input while validation flags it
    pub validation_message: Option<String>,
}

impl InputOptions {
    /// Run the validator, treating a missing one as "everything is valid"
    pub fn validate(&self, text: &str) -> InputValidation {
        match self.validate {
            Some(validator) => validator(text),
            None => InputValidation::accepted(text),
        }
    }
}

/// Interactive prompts the flows depend on
///
/// Every method returns `Ok(None)` when the user dismisses the prompt.
#[async_trait]
pub trait QuickInputService: Send + Sync {
    /// Single choice; returns the chosen item
    async fn pick(&self, items: Vec<QuickPickItem>) -> Result<Option<QuickPickItem>>;

    /// Multi choice; returns the items left checked
    async fn pick_many(&self, items: Vec<QuickPickItem>) -> Result<Option<Vec<QuickPickItem>>>;

    /// Free text; returns the entered text
    async fn input(&self, options: InputOptions) -> Result<Option<String>>;
}
