use super::CommandHandler;
use crate::domains::DomainSource;
use crate::workbench::Workbench;
use crate::Result;
use async_trait::async_trait;
use serde_json::json;

/// Handler for the `list` command
pub struct ListCommand {
    pub json: bool,
}

impl ListCommand {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

fn source_name(source: DomainSource) -> &'static str {
    match source {
        DomainSource::Stored => "stored",
        DomainSource::ProductDefault => "product default",
        DomainSource::Empty => "empty",
    }
}

#[async_trait]
impl CommandHandler for ListCommand {
    async fn execute(&self, workbench: &mut Workbench) -> Result<()> {
        let (list, source) = workbench.trusted_domains().current()?;

        if self.json {
            let output = json!({
                "source": source_name(source),
                "allowAll": list.has_wildcard(),
                "domains": list.domains().collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Trusted domains ({})", source_name(source));
        if list.has_wildcard() {
            println!("  * all links open without prompt");
        }
        if list.domains().next().is_none() {
            println!("  (no domains)");
        }
        for domain in list.domains() {
            println!("  - {domain}");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "list"
    }
}
