use crate::{Result, TrustgateError};
use std::collections::BTreeMap;

/// A command the workbench exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub id: String,
    pub description: String,
}

/// Registered commands by id
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_command(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        if self.commands.contains_key(&descriptor.id) {
            return Err(TrustgateError::Registry(format!(
                "command '{}' is already registered",
                descriptor.id
            )));
        }
        self.commands.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&CommandDescriptor> {
        self.commands.get(id)
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }
}
