//! `cairn catalog` command handler

use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, info};

use cairn_catalog::{
    CatalogEntry, CatalogEvent, CatalogerBuilder, CatalogerConfig, PackageMetadata, SbomGenerator,
};
use cairn_core::config::CairnConfig;

use crate::cli::CatalogArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Pins the SBOM creation timestamp for reproducible output.
const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Execute the `catalog` command.
///
/// Reads a JSON array of package metadata records, catalogs them, and prints
/// either a catalog report or (with `--sbom`) an SBOM document.
///
/// # Errors
///
/// * `CliError::Io` if the input file cannot be read
/// * `CliError::Command` if the file is not a valid metadata array
/// * `CliError::Catalog` if cataloging or SBOM generation fails
pub async fn execute(
    args: CatalogArgs,
    config: &CairnConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %args.file.display(), "cataloging package metadata");

    let packages = read_packages(&args.file).await?;

    let mut catalog_config = CatalogerConfig::from_core(&config.catalog);
    if args.no_files {
        catalog_config.include_files = false;
    }
    if let Some(format) = args.sbom {
        catalog_config.output_format = format.into();
    }

    let (cataloger, event_rx) = CatalogerBuilder::new().config(catalog_config).build()?;

    let drain = event_rx.map(|mut rx| {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                log_event(&event);
            }
        })
    });

    let result = cataloger.catalog(packages).await;
    let include_files = cataloger.config().include_files;
    let format = cataloger.config().output_format;
    // Closes the event channel so the drain task can finish.
    drop(cataloger);
    if let Some(handle) = drain {
        handle
            .await
            .map_err(|e| CliError::Command(format!("event drain task failed: {e}")))?;
    }
    let entries = result?;

    if args.sbom.is_some() {
        let document = SbomGenerator::new(format)
            .include_files(include_files)
            .generate(&entries, creation_time())?;
        info!(
            format = %document.format,
            components = document.component_count,
            "sbom generated"
        );
        return writer.write_raw(&document.content);
    }

    writer.render(&CatalogReport::new(
        args.file.display().to_string(),
        entries,
        include_files,
    ))
}

async fn read_packages(path: &Path) -> Result<Vec<PackageMetadata>, CliError> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|e| {
        CliError::Command(format!(
            "invalid package metadata in {}: {e}",
            path.display()
        ))
    })
}

fn log_event(event: &CatalogEvent) {
    debug!(event = %event, "catalog event");
}

/// SBOM creation time: `SOURCE_DATE_EPOCH` when set and valid, otherwise now.
fn creation_time() -> SystemTime {
    std::env::var(SOURCE_DATE_EPOCH)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap_or_else(SystemTime::now)
}

/// Catalog result report.
#[derive(Debug, Serialize)]
pub struct CatalogReport {
    /// Input file path
    pub source: String,
    /// Number of packages cataloged
    pub package_count: usize,
    /// Total owned files across all packages
    pub file_count: usize,
    /// Per-package entries, in input order
    pub packages: Vec<CatalogEntry>,
    #[serde(skip)]
    include_files: bool,
}

impl CatalogReport {
    /// Build a report; owned files are stripped when `include_files` is false.
    pub fn new(source: String, mut packages: Vec<CatalogEntry>, include_files: bool) -> Self {
        let file_count = packages.iter().map(|p| p.owned_files.len()).sum();
        if !include_files {
            for package in &mut packages {
                package.owned_files.clear();
            }
        }
        Self {
            source,
            package_count: packages.len(),
            file_count,
            packages,
            include_files,
        }
    }
}

impl Render for CatalogReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Catalog: {}", self.source.bold())?;
        writeln!(
            w,
            "  Packages: {}  Files: {}",
            self.package_count, self.file_count
        )?;

        for package in &self.packages {
            writeln!(w)?;
            writeln!(w, "{}", package.purl.green())?;
            if self.include_files {
                for file in &package.owned_files {
                    writeln!(w, "  {file}")?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_catalog::Ecosystem;

    fn entry(name: &str, files: &[&str]) -> CatalogEntry {
        CatalogEntry {
            ecosystem: Ecosystem::Alpine,
            name: name.to_owned(),
            version: "1.0-r0".to_owned(),
            purl: format!("pkg:alpine/{name}@1.0-r0?arch=x86_64"),
            owned_files: files.iter().map(|f| (*f).to_owned()).collect(),
        }
    }

    fn render(report: &CatalogReport) -> String {
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_report_counts() {
        let report = CatalogReport::new(
            "installed.json".to_owned(),
            vec![entry("musl", &["/lib/a", "/lib/b"]), entry("busybox", &["/bin/sh"])],
            true,
        );
        assert_eq!(report.package_count, 2);
        assert_eq!(report.file_count, 3);
    }

    #[test]
    fn test_report_text_lists_purls_and_files() {
        let report = CatalogReport::new(
            "installed.json".to_owned(),
            vec![entry("musl", &["/lib/ld-musl-x86_64.so.1"])],
            true,
        );
        let text = render(&report);
        assert!(text.contains("installed.json"));
        assert!(text.contains("pkg:alpine/musl@1.0-r0?arch=x86_64"));
        assert!(text.contains("  /lib/ld-musl-x86_64.so.1"));
    }

    #[test]
    fn test_report_without_files_keeps_counts() {
        let report = CatalogReport::new(
            "installed.json".to_owned(),
            vec![entry("musl", &["/lib/a", "/lib/b"])],
            false,
        );
        assert_eq!(report.file_count, 2);
        assert!(report.packages[0].owned_files.is_empty());

        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["file_count"], 2);
        assert_eq!(json["packages"][0]["owned_files"], serde_json::json!([]));
        assert!(json.get("include_files").is_none());
    }

    #[tokio::test]
    async fn test_read_packages_rejects_non_array() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"name": "musl"}"#).expect("write");

        let err = read_packages(&path).await.unwrap_err();
        assert!(matches!(err, CliError::Command(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_read_packages_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let err = read_packages(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }
}
