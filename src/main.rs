//! trustgate command line entry point

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use trustgate::{
    cli::commands::{
        check::CheckCommand, configure::ConfigureCommand, contributions::ContributionsCommand,
        list::ListCommand, settings::SettingsCommand, CommandHandler,
    },
    cli::{Cli, Commands, LogLevel},
    config::ProductConfig,
    io::TrustgatePaths,
    storage::JsonFileStorage,
    workbench::Workbench,
};

fn initialize_tracing(log_level: LogLevel) {
    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    if cli.command.is_interactive() && !std::io::stdin().is_terminal() {
        bail!("stdin is not a terminal; pass --action to configure without prompting");
    }

    let mut paths = match TrustgatePaths::new() {
        Ok(paths) => paths,
        Err(e) => {
            let current_dir =
                std::env::current_dir().context("Failed to resolve the current directory")?;
            warn!("{}; using {}", e, current_dir.display());
            TrustgatePaths::for_root(&current_dir)
        }
    };
    if let Some(storage_dir) = cli.storage_dir.clone() {
        paths = paths.with_storage_dir(storage_dir);
    }
    let product_file = cli
        .product
        .clone()
        .unwrap_or_else(|| paths.product_config_file());

    let product = ProductConfig::load(&product_file)
        .with_context(|| format!("Failed to load product config {}", product_file.display()))?;
    let storage = JsonFileStorage::new(&paths.storage_dir).with_context(|| {
        format!("Failed to open storage in {}", paths.storage_dir.display())
    })?;
    let mut workbench = Workbench::new(product, Arc::new(storage))?;

    let handler: Box<dyn CommandHandler> = match cli.command {
        Commands::Configure {
            action,
            domain,
            remove,
            tui,
        } => Box::new(ConfigureCommand::new(action, domain, remove, tui)),
        Commands::List { json } => Box::new(ListCommand::new(json)),
        Commands::Check { url } => Box::new(CheckCommand::new(url)),
        Commands::Contributions { manifests } => Box::new(ContributionsCommand::new(manifests)),
        Commands::Settings { json } => Box::new(SettingsCommand::new(json)),
    };

    debug!(command = handler.name(), "Dispatching command");
    handler
        .execute(&mut workbench)
        .await
        .with_context(|| format!("{} failed", handler.name()))?;

    Ok(())
}
