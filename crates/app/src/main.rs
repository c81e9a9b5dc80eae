//! Spaceport - Main Entry Point
//!
//! Parses the command line, resolves settings, initializes logging and
//! runs one command against the space management API.

mod cli;
mod commands;
mod logging;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use spaceport_domain::Settings;
use spaceport_infrastructure::SettingsRepository;

use crate::cli::Cli;
use crate::commands::AppContext;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let repository = cli
        .settings
        .as_ref()
        .map_or_else(SettingsRepository::new, SettingsRepository::at);
    let settings = load_settings(&cli, &repository).await?;
    tracing::debug!(domain = %settings.api_domain, "settings resolved");

    let ctx = AppContext::new(settings, repository)?;
    commands::run(&ctx, cli.command).await
}

/// Flags and environment override the settings file.
async fn load_settings(cli: &Cli, repository: &SettingsRepository) -> Result<Settings> {
    let mut settings = repository
        .load()
        .await
        .context("failed to load settings")?;

    if let Some(domain) = &cli.domain {
        settings.api_domain = domain.clone();
    }
    Ok(settings)
}
