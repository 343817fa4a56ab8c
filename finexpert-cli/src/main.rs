use anyhow::Context;
use clap::Parser;
use tracing::debug;

use finexpert_cli::cli::Cli;
use finexpert_cli::config::Config;
use finexpert_cli::{commands, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = Some(level.clone());
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }

    logging::init_logging(config.log_level(), config.logging.file.as_deref())
        .context("failed to start logging")?;
    debug!(?config, "configuration loaded");

    let report = commands::run(&cli.command, &config)?;
    print!("{report}");

    Ok(())
}
