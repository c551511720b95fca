use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domains::ConfigureTrustedDomainAction;

/// trustgate: link protection settings for the editor workbench
#[derive(Parser, Debug)]
#[command(name = "trustgate")]
#[command(version = "0.1.0")]
#[command(
    about = "Manage trusted domains for link protection and inspect webview editor contributions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Product config file (defaults to <config dir>/product.yaml)
    #[arg(long, global = true)]
    pub product: Option<PathBuf>,

    /// Override the storage directory
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Trusted domain action selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    ToggleAll,
    Add,
    Configure,
    Reset,
}

impl From<ActionArg> for ConfigureTrustedDomainAction {
    fn from(action: ActionArg) -> Self {
        match action {
            ActionArg::ToggleAll => ConfigureTrustedDomainAction::ToggleAll,
            ActionArg::Add => ConfigureTrustedDomainAction::Add,
            ActionArg::Configure => ConfigureTrustedDomainAction::Configure,
            ActionArg::Reset => ConfigureTrustedDomainAction::Reset,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure trusted domains (interactive unless --action is given)
    Configure {
        /// Run this action without prompting
        #[arg(long, value_enum)]
        action: Option<ActionArg>,

        /// Domain to add (with --action add)
        #[arg(long, requires = "action")]
        domain: Option<String>,

        /// Domain to remove (with --action configure, repeatable)
        #[arg(long, requires = "action")]
        remove: Vec<String>,

        /// Use the full-screen picker
        #[arg(long, conflicts_with = "action")]
        tui: bool,
    },

    /// Show the current trusted domains
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a link opens without prompting
    Check {
        /// URL to check
        url: String,
    },

    /// Read webview editor contributions from extension manifests
    Contributions {
        /// Extension manifest files (package.json)
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },

    /// Show registered configuration defaults and commands
    Settings {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Configure { .. } => "configure",
            Commands::List { .. } => "list",
            Commands::Check { .. } => "check",
            Commands::Contributions { .. } => "contributions",
            Commands::Settings { .. } => "settings",
        }
    }

    /// Check if this command prompts on the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Configure { action: None, .. })
    }
}
