use super::CommandHandler;
use crate::workbench::Workbench;
use crate::Result;
use async_trait::async_trait;

/// Handler for the `check` command
pub struct CheckCommand {
    pub url: String,
}

impl CheckCommand {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl CommandHandler for CheckCommand {
    async fn execute(&self, workbench: &mut Workbench) -> Result<()> {
        if workbench.trusted_domains().is_trusted(&self.url)? {
            println!("✅ {} opens without prompt", self.url);
        } else {
            println!("⚠️  {} asks for confirmation before opening", self.url);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "check"
    }
}
