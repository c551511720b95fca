use super::{InputOptions, QuickInputService, QuickPickItem};
use crate::{Result, TrustgateError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A pre-recorded answer to one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Choose the item whose id or label matches; `None` dismisses
    Pick(Option<String>),
    /// Leave exactly the items with these ids checked; `None` dismisses
    PickMany(Option<Vec<String>>),
    /// Enter the given text; `None` dismisses
    Input(Option<String>),
}

/// A prompt the scripted front-end was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShownPrompt {
    Pick(Vec<QuickPickItem>),
    PickMany(Vec<QuickPickItem>),
    Input { placeholder: String },
}

/// Answers prompts from a queue instead of a user
#[derive(Debug, Default)]
pub struct ScriptedQuickInput {
    answers: Mutex<VecDeque<ScriptedAnswer>>,
    shown: Mutex<Vec<ShownPrompt>>,
}

impl ScriptedQuickInput {
    pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, oldest first
    pub fn shown(&self) -> Vec<ShownPrompt> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or(0)
    }

    fn record(&self, prompt: ShownPrompt) -> Result<()> {
        self.shown
            .lock()
            .map_err(|_| TrustgateError::QuickInput("scripted prompt log poisoned".to_string()))?
            .push(prompt);
        Ok(())
    }

    fn next_answer(&self, expected: &str) -> Result<ScriptedAnswer> {
        self.answers
            .lock()
            .map_err(|_| TrustgateError::QuickInput("scripted answers poisoned".to_string()))?
            .pop_front()
            .ok_or_else(|| {
                TrustgateError::QuickInput(format!("no scripted answer left for {expected} prompt"))
            })
    }
}

fn matches(item: &QuickPickItem, key: &str) -> bool {
    item.id == key || item.label == key
}

#[async_trait]
impl QuickInputService for ScriptedQuickInput {
    async fn pick(&self, items: Vec<QuickPickItem>) -> Result<Option<QuickPickItem>> {
        self.record(ShownPrompt::Pick(items.clone()))?;

        match self.next_answer("pick")? {
            ScriptedAnswer::Pick(None) => Ok(None),
            ScriptedAnswer::Pick(Some(key)) => items
                .into_iter()
                .find(|item| matches(item, &key))
                .map(Some)
                .ok_or_else(|| {
                    TrustgateError::QuickInput(format!("scripted pick '{key}' is not offered"))
                }),
            other => Err(TrustgateError::QuickInput(format!(
                "expected a pick answer, got {other:?}"
            ))),
        }
    }

    async fn pick_many(&self, items: Vec<QuickPickItem>) -> Result<Option<Vec<QuickPickItem>>> {
        self.record(ShownPrompt::PickMany(items.clone()))?;

        match self.next_answer("multi-pick")? {
            ScriptedAnswer::PickMany(None) => Ok(None),
            ScriptedAnswer::PickMany(Some(keys)) => Ok(Some(
                items
                    .into_iter()
                    .filter(|item| keys.contains(&item.id))
                    .map(|item| item.picked(true))
                    .collect(),
            )),
            other => Err(TrustgateError::QuickInput(format!(
                "expected a multi-pick answer, got {other:?}"
            ))),
        }
    }

    async fn input(&self, options: InputOptions) -> Result<Option<String>> {
        self.record(ShownPrompt::Input {
            placeholder: options.placeholder.clone(),
        })?;

        match self.next_answer("input")? {
            ScriptedAnswer::Input(text) => Ok(text),
            other => Err(TrustgateError::QuickInput(format!(
                "expected an input answer, got {other:?}"
            ))),
        }
    }
}
