//! Cairn CLI library
//!
//! Exposes the argument model, command handlers, and output abstraction so the
//! binary in `main.rs` stays a thin wrapper and handlers stay unit-testable.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

use tracing::debug;

use cairn_core::config::CairnConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

/// Run a parsed command line to completion.
///
/// Builds configuration as defaults, then file, then env, then CLI flags, and
/// validates once at the end. Initializes logging, then dispatches.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match effective_config(&cli).await {
        Ok(config) => config,
        // `config validate` reports a broken file itself; log with defaults meanwhile.
        Err(_) if matches!(cli.command, Commands::Config(_)) => CairnConfig::default(),
        Err(e) => return Err(e),
    };

    logging::init_tracing(&config.general, cli.verbose)?;
    debug!(config = %cli.config.display(), "cairn starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Purl(args) => commands::purl::execute(args, &writer),
        Commands::Catalog(args) => commands::catalog::execute(args, &config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}

/// Load every configuration layer and validate the result.
async fn effective_config(cli: &Cli) -> Result<CairnConfig, CliError> {
    let config = CairnConfig::load_layers(&cli.config).await?;
    apply_cli_overrides(config, cli)
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_cli_overrides(mut config: CairnConfig, cli: &Cli) -> Result<CairnConfig, CliError> {
    if let Some(level) = &cli.log_level {
        config.general.log_level = level.to_lowercase();
    }
    if cli.quiet {
        config.general.quiet = true;
    }
    config.validate()?;
    Ok(config)
}
