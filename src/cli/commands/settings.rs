use super::CommandHandler;
use crate::workbench::Workbench;
use crate::Result;
use async_trait::async_trait;
use serde_json::json;

/// Handler for the `settings` command
pub struct SettingsCommand {
    pub json: bool,
}

impl SettingsCommand {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

#[async_trait]
impl CommandHandler for SettingsCommand {
    async fn execute(&self, workbench: &mut Workbench) -> Result<()> {
        let configuration = workbench.configuration();
        let commands = workbench.commands();

        if self.json {
            let output = json!({
                "configuration": configuration.nodes(),
                "defaults": configuration.defaults(),
                "commands": commands.commands().map(|c| &c.id).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        for node in configuration.nodes() {
            println!("{} (order {})", node.title, node.order);
            for (key, property) in &node.properties {
                println!("  {key} = {}", property.default);
                println!("    {}", property.description);
            }
        }
        println!("Commands:");
        for command in commands.commands() {
            println!("  {}: {}", command.id, command.description);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "settings"
    }
}
