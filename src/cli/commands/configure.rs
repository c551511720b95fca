use super::CommandHandler;
use crate::cli::app::ActionArg;
use crate::domains::{ConfigureTrustedDomainAction, FlowOutcome, TrustedDomainList};
use crate::quickinput::{
    QuickInputService, ScriptedAnswer, ScriptedQuickInput, TerminalQuickInput,
};
use crate::workbench::Workbench;
use crate::{Result, TrustgateError};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Handler for the `configure` command
pub struct ConfigureCommand {
    pub action: Option<ActionArg>,
    pub domain: Option<String>,
    pub remove: Vec<String>,
    pub tui: bool,
}

impl ConfigureCommand {
    pub fn new(
        action: Option<ActionArg>,
        domain: Option<String>,
        remove: Vec<String>,
        tui: bool,
    ) -> Self {
        Self {
            action,
            domain,
            remove,
            tui,
        }
    }

    fn interactive_front_end(&self) -> Result<Box<dyn QuickInputService>> {
        if !self.tui {
            return Ok(Box::new(TerminalQuickInput::stdio()));
        }

        #[cfg(feature = "tui")]
        {
            Ok(Box::new(crate::cli::tui::TuiQuickInput::new()))
        }
        #[cfg(not(feature = "tui"))]
        {
            Err(TrustgateError::QuickInput(
                "this build has no full-screen picker; rebuild with --features tui".to_string(),
            ))
        }
    }
}

/// Answers that drive the flow without a user
pub fn scripted_answers(
    action: ConfigureTrustedDomainAction,
    domain: Option<&str>,
    remove: &[String],
    current: &TrustedDomainList,
) -> Result<Vec<ScriptedAnswer>> {
    let mut answers = vec![ScriptedAnswer::Pick(Some(action.id().to_string()))];

    match action {
        ConfigureTrustedDomainAction::Add => {
            let domain = domain.ok_or_else(|| {
                TrustgateError::QuickInput("--action add needs --domain".to_string())
            })?;
            answers.push(ScriptedAnswer::Input(Some(domain.to_string())));
        }
        ConfigureTrustedDomainAction::Configure => {
            for entry in remove {
                if !current.domains().any(|domain| domain == entry) {
                    warn!("'{}' is not a trusted domain; nothing to remove", entry);
                }
            }
            // Multi-pick items are keyed by position among the domains
            let keep = current
                .domains()
                .enumerate()
                .filter(|(_, domain)| !remove.iter().any(|entry| entry == domain))
                .map(|(index, _)| index.to_string())
                .collect();
            answers.push(ScriptedAnswer::PickMany(Some(keep)));
        }
        ConfigureTrustedDomainAction::ToggleAll | ConfigureTrustedDomainAction::Reset => {}
    }

    Ok(answers)
}

fn report(outcome: &FlowOutcome) {
    match outcome {
        FlowOutcome::Cancelled => println!("No changes made."),
        FlowOutcome::Unchanged => println!("Trusted domains left unchanged."),
        FlowOutcome::Persisted(list) => {
            println!("✅ Trusted domains updated");
            if list.has_wildcard() {
                println!("  * all links open without prompt");
            }
            for domain in list.domains() {
                println!("  - {domain}");
            }
        }
    }
}

#[async_trait]
impl CommandHandler for ConfigureCommand {
    async fn execute(&self, workbench: &mut Workbench) -> Result<()> {
        let service = workbench.trusted_domains();

        let outcome = match self.action {
            Some(action) => {
                let (current, _) = service.current()?;
                let answers = scripted_answers(
                    action.into(),
                    self.domain.as_deref(),
                    &self.remove,
                    &current,
                )?;
                debug!(?answers, "Running trusted domain flow non-interactively");
                service.configure(&ScriptedQuickInput::new(answers)).await?
            }
            None => {
                let front_end = self.interactive_front_end()?;
                service.configure(front_end.as_ref()).await?
            }
        };

        report(&outcome);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "configure"
    }
}
