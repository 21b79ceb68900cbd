//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use cairn_catalog::SbomFormat;

/// Cairn -- package identity and file-ownership cataloging.
///
/// Use `cairn <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "cairn", version, about, long_about = None)]
pub struct Cli {
    /// Path to the cairn.toml configuration file (missing file = defaults).
    #[arg(short, long, global = true, default_value = "cairn.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace). Forces console logging.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress console logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build or parse Package URLs.
    Purl(PurlArgs),

    /// Catalog a JSON file of package metadata records.
    Catalog(CatalogArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- purl ----

/// Build or parse Package URLs.
#[derive(Args, Debug)]
pub struct PurlArgs {
    #[command(subcommand)]
    pub action: PurlAction,
}

#[derive(Subcommand, Debug)]
pub enum PurlAction {
    /// Build the canonical purl of an Alpine package.
    Build {
        /// Package name (P:).
        #[arg(long)]
        name: String,
        /// Package version (V:).
        #[arg(long, default_value = "")]
        version: String,
        /// Package architecture (A:).
        #[arg(long, default_value = "")]
        arch: String,
    },
    /// Parse a purl and print its decoded components.
    Parse {
        /// Package URL, e.g. pkg:alpine/musl@1.2.4-r2?arch=x86_64
        purl: String,
    },
}

// ---- catalog ----

/// Catalog package metadata records read from a JSON file.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// JSON file containing an array of package metadata records.
    pub file: PathBuf,

    /// Emit an SBOM document instead of a catalog report.
    #[arg(long)]
    pub sbom: Option<SbomFormatArg>,

    /// Leave owned files out of the report or SBOM.
    #[arg(long)]
    pub no_files: bool,
}

/// SBOM formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SbomFormatArg {
    /// CycloneDX 1.5 JSON.
    #[value(name = "cyclonedx", alias = "cdx")]
    CycloneDx,
    /// SPDX 2.3 JSON.
    #[value(name = "spdx")]
    Spdx,
}

impl From<SbomFormatArg> for SbomFormat {
    fn from(arg: SbomFormatArg) -> Self {
        match arg {
            SbomFormatArg::CycloneDx => SbomFormat::CycloneDx,
            SbomFormatArg::Spdx => SbomFormat::Spdx,
        }
    }
}

// ---- config ----

/// Manage cairn configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, catalog).
        #[arg(long)]
        section: Option<String>,
    },
}
