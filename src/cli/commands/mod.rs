pub mod check;
pub mod configure;
pub mod contributions;
pub mod list;
pub mod settings;

use crate::workbench::Workbench;
use crate::Result;
use async_trait::async_trait;

/// Common trait for all command handlers
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Execute the command against the assembled workbench
    async fn execute(&self, workbench: &mut Workbench) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}
