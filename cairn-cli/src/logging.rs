//! Logging initialization for the cairn CLI.
//!
//! Configures `tracing-subscriber` based on the `[general]` section
//! of `CairnConfig` and the `-v` / `-q` flags. Supports JSON structured
//! logging and human-readable pretty format, on stderr, in a log file, or both.
//!
//! Stdout is reserved for command output, so console logs always go to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use cairn_core::config::GeneralConfig;

use crate::error::CliError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Where log records go, derived from config and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPlan {
    /// Effective filter directive (e.g. "info", "trace").
    pub level: String,
    /// Write to stderr.
    pub console: bool,
    /// Append to this file, if any.
    pub file: Option<String>,
    /// Emit JSON lines instead of pretty output.
    pub json: bool,
}

impl LogPlan {
    /// Resolve the logging plan.
    ///
    /// * `-v` raises the level to `debug`, `-vv` (or more) to `trace`.
    /// * Console output is on when no log file is configured or when `-v` is given,
    ///   unless quiet mode is set.
    pub fn resolve(config: &GeneralConfig, verbose: u8) -> Self {
        let level = match verbose {
            0 => config.log_level.clone(),
            1 => "debug".to_owned(),
            _ => "trace".to_owned(),
        };
        let file = (!config.log_file.is_empty()).then(|| config.log_file.clone());
        let console = !config.quiet && (file.is_none() || verbose > 0);

        Self {
            level,
            console,
            file,
            json: config.log_format == "json",
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
/// `RUST_LOG` takes precedence over the configured level unless `-v` was given.
pub fn init_tracing(config: &GeneralConfig, verbose: u8) -> Result<(), CliError> {
    let plan = LogPlan::resolve(config, verbose);

    let env_filter = if verbose > 0 {
        EnvFilter::new(&plan.level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&plan.level))
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if plan.console {
        layers.push(fmt_layer(plan.json, std::io::stderr, true));
    }

    if let Some(path) = &plan.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| CliError::Config(format!("cannot open log file '{path}': {e}")))?;
        layers.push(fmt_layer(plan.json, Mutex::new(file), false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| CliError::Command(format!("failed to initialize tracing subscriber: {e}")))?;

    Ok(())
}

fn fmt_layer<W>(json: bool, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    if json {
        layer.json().boxed()
    } else {
        layer.pretty().boxed()
    }
}
