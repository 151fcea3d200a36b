//! Birthday calendar CLI
//!
//! Lists upcoming birthdays from a CardDAV address book.

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, init_logging};
use presentation_cli::{Cli, check_config, log_filter_override, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Set up logging; -v overrides the configured filter
    init_logging(&config.logging, log_filter_override(cli.verbose))?;

    check_config(&config)?;

    run(cli.command, &config, &mut std::io::stdout()).await
}
