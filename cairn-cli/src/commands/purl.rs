//! `cairn purl` command handler

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use tracing::debug;

use cairn_catalog::{ApkMetadata, PackageIdentity, PackageUrl};

use crate::cli::{PurlAction, PurlArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `purl` command.
pub fn execute(args: PurlArgs, writer: &OutputWriter) -> Result<(), CliError> {
    match args.action {
        PurlAction::Build {
            name,
            version,
            arch,
        } => execute_build(name, version, arch, writer),
        PurlAction::Parse { purl } => execute_parse(&purl, writer),
    }
}

/// Build the canonical purl for an Alpine package.
///
/// Never fails on input: empty version or arch simply drop their segment.
fn execute_build(
    name: String,
    version: String,
    arch: String,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let package = ApkMetadata::new(name, version, arch);
    let purl = package.package_url();
    debug!(purl = %purl, "built package url");

    let report = PurlBuildReport {
        purl,
        name: package.name,
        version: package.version,
        arch: package.architecture,
    };
    writer.render(&report)
}

/// Parse a purl and display its decoded components.
///
/// # Errors
///
/// Returns `CliError::Purl` if the input is not a well-formed Package URL.
fn execute_parse(input: &str, writer: &OutputWriter) -> Result<(), CliError> {
    let parsed: PackageUrl = input.parse()?;
    debug!(purl = %parsed, "parsed package url");

    writer.render(&PurlParseReport::from(&parsed))
}

/// Result of `cairn purl build`.
#[derive(Debug, Serialize)]
pub struct PurlBuildReport {
    /// Canonical Package URL
    pub purl: String,
    pub name: String,
    pub version: String,
    pub arch: String,
}

impl Render for PurlBuildReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{}", self.purl)
    }
}

/// Decoded components of a Package URL.
#[derive(Debug, Serialize)]
pub struct PurlParseReport {
    /// Canonical re-rendering of the input
    pub purl: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub qualifiers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
}

impl From<&PackageUrl> for PurlParseReport {
    fn from(purl: &PackageUrl) -> Self {
        Self {
            purl: purl.to_string(),
            ty: purl.ty().to_owned(),
            namespace: purl.namespace().map(str::to_owned),
            name: purl.name().to_owned(),
            version: purl.version().map(str::to_owned),
            qualifiers: purl
                .qualifiers()
                .iter()
                .map(|(k, v)| (k.as_str().to_owned(), v.clone()))
                .collect(),
            subpath: purl.subpath().map(str::to_owned),
        }
    }
}

impl Render for PurlParseReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "{}", self.purl.bold())?;
        writeln!(w, "  type:      {}", self.ty)?;
        if let Some(ref namespace) = self.namespace {
            writeln!(w, "  namespace: {namespace}")?;
        }
        writeln!(w, "  name:      {}", self.name)?;
        if let Some(ref version) = self.version {
            writeln!(w, "  version:   {version}")?;
        }
        for (key, value) in &self.qualifiers {
            writeln!(w, "  {}: {value}", format!("{key:<9}").dimmed())?;
        }
        if let Some(ref subpath) = self.subpath {
            writeln!(w, "  subpath:   {subpath}")?;
        }
        Ok(())
    }
}
