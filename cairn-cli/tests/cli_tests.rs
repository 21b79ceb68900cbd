//! End-to-end tests for the `cairn` binary.
//!
//! Each test runs the compiled binary with a scrubbed environment and an
//! isolated config path, then checks stdout and the exit code.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run `cairn` with `-c <dir>/cairn.toml` and no CAIRN_* / RUST_LOG influence.
fn cairn(config_dir: &TempDir, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cairn"));
    cmd.arg("-c").arg(config_dir.path().join("cairn.toml"));
    cmd.args(args);
    for (key, _) in std::env::vars() {
        if key.starts_with("CAIRN_") {
            cmd.env_remove(key);
        }
    }
    cmd.env_remove("RUST_LOG")
        .env_remove("SOURCE_DATE_EPOCH")
        .env("NO_COLOR", "1");
    cmd.output().expect("failed to run cairn binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ---- purl ----

#[test]
fn test_purl_build_keeps_plus_literal() {
    let dir = TempDir::new().expect("temp dir");
    let output = cairn(
        &dir,
        &["purl", "build", "--name", "g++", "--version", "v84", "--arch", "am86"],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "pkg:alpine/g++@v84?arch=am86\n");
}

#[test]
fn test_purl_build_encodes_spaces() {
    let dir = TempDir::new().expect("temp dir");
    let output = cairn(
        &dir,
        &[
            "purl", "build", "--name", "g plus plus", "--version", "v84", "--arch", "am86",
        ],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "pkg:alpine/g%20plus%20plus@v84?arch=am86\n");
}

#[test]
fn test_purl_build_without_version_or_arch() {
    let dir = TempDir::new().expect("temp dir");
    let output = cairn(&dir, &["purl", "build", "--name", "musl"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "pkg:alpine/musl\n");
}

#[test]
fn test_purl_build_json_output() {
    let dir = TempDir::new().expect("temp dir");
    let output = cairn(
        &dir,
        &[
            "--output", "json", "purl", "build", "--name", "musl", "--version", "1.2.4-r2",
            "--arch", "x86_64",
        ],
    );

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["purl"], "pkg:alpine/musl@1.2.4-r2?arch=x86_64");
    assert_eq!(json["name"], "musl");
    assert_eq!(json["arch"], "x86_64");
}

#[test]
fn test_purl_parse_decodes_components() {
    let dir = TempDir::new().expect("temp dir");
    let output = cairn(
        &dir,
        &[
            "--output",
            "json",
            "purl",
            "parse",
            "pkg:alpine/g%20plus%20plus@v84?arch=am86",
        ],
    );

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["type"], "alpine");
    assert_eq!(json["name"], "g plus plus");
    assert_eq!(json["version"], "v84");
    assert_eq!(json["qualifiers"]["arch"], "am86");
}

#[test]
fn test_purl_parse_invalid_exits_1() {
    let dir = TempDir::new().expect("temp dir");
    let output = cairn(&dir, &["purl", "parse", "alpine/musl@1.0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid package url"), "stderr: {stderr}");
}

// ---- catalog ----

#[test]
fn test_catalog_text_report() {
    let dir = TempDir::new().expect("temp dir");
    let input = fixture("installed.json");
    let output = cairn(&dir, &["catalog", input.to_str().expect("utf-8 path")]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Packages: 3  Files: 5"), "stdout: {text}");
    assert!(text.contains("pkg:alpine/libstdc++@12.2.1_git20220924-r10?arch=x86_64"));

    // Owned files are listed sorted by byte value.
    let ld = text.find("/lib/ld-musl-x86_64.so.1").expect("ld path");
    let libc = text.find("/lib/libc.musl-x86_64.so.1").expect("libc path");
    assert!(ld < libc);
}

#[test]
fn test_catalog_json_report_in_input_order() {
    let dir = TempDir::new().expect("temp dir");
    let input = fixture("installed.json");
    let output = cairn(
        &dir,
        &["--output", "json", "catalog", input.to_str().expect("utf-8 path")],
    );

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["package_count"], 3);
    assert_eq!(json["file_count"], 5);

    let packages = json["packages"].as_array().expect("packages array");
    assert_eq!(packages[0]["name"], "musl");
    assert_eq!(
        packages[0]["owned_files"],
        serde_json::json!(["/lib/ld-musl-x86_64.so.1", "/lib/libc.musl-x86_64.so.1"])
    );
    assert_eq!(
        packages[1]["owned_files"],
        serde_json::json!(["/usr/lib/libstdc++.so.6"])
    );
}

#[test]
fn test_catalog_cyclonedx_sbom() {
    let dir = TempDir::new().expect("temp dir");
    let input = fixture("installed.json");
    let output = cairn(
        &dir,
        &["catalog", input.to_str().expect("utf-8 path"), "--sbom", "cyclonedx"],
    );

    assert!(output.status.success());
    let bom = stdout_json(&output);
    assert_eq!(bom["bomFormat"], "CycloneDX");

    let components = bom["components"].as_array().expect("components");
    assert_eq!(components.len(), 3);
    // Components are ordered by purl.
    assert_eq!(
        components[0]["purl"],
        "pkg:alpine/ca-certificates-bundle@20230506-r0?arch=x86_64"
    );
    assert_eq!(components[2]["purl"], "pkg:alpine/musl@1.2.4-r2?arch=x86_64");
}

#[test]
fn test_catalog_spdx_sbom_without_files() {
    let dir = TempDir::new().expect("temp dir");
    let input = fixture("installed.json");
    let output = cairn(
        &dir,
        &[
            "catalog",
            input.to_str().expect("utf-8 path"),
            "--sbom",
            "spdx",
            "--no-files",
        ],
    );

    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert_eq!(doc["spdxVersion"], "SPDX-2.3");
    let packages = doc["packages"].as_array().expect("packages");
    assert_eq!(packages.len(), 3);
    assert!(packages.iter().all(|p| p.get("hasFiles").is_none()));
}

#[test]
fn test_catalog_sbom_is_reproducible_with_source_date_epoch() {
    let dir = TempDir::new().expect("temp dir");
    let input = fixture("installed.json");
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_cairn"))
            .arg("-c")
            .arg(dir.path().join("cairn.toml"))
            .args(["-q", "catalog", input.to_str().expect("utf-8 path"), "--sbom", "spdx"])
            .env("SOURCE_DATE_EPOCH", "1704067200")
            .output()
            .expect("failed to run cairn binary")
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let doc = stdout_json(&first);
    assert_eq!(doc["creationInfo"]["created"], "2024-01-01T00:00:00Z");
}

#[test]
fn test_catalog_missing_file_exits_10() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent.json");
    let output = cairn(&dir, &["catalog", missing.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(10));
}

#[test]
fn test_catalog_malformed_input_exits_1() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("bad.json");
    std::fs::write(&input, "not json").expect("write input");
    let output = cairn(&dir, &["catalog", input.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_catalog_respects_max_packages() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("cairn.toml"),
        "[catalog]\nmax_packages = 2\n",
    )
    .expect("write config");
    let input = fixture("installed.json");
    let output = cairn(&dir, &["catalog", input.to_str().expect("utf-8 path")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}

// ---- config ----

#[test]
fn test_config_validate_valid_file() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("cairn.toml"),
        "[general]\nlog_level = \"warn\"\n\n[catalog]\nworkers = 2\noutput_format = \"spdx\"\n",
    )
    .expect("write config");

    let output = cairn(&dir, &["--output", "json", "config", "validate"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["errors"], serde_json::json!([]));
}

#[test]
fn test_config_validate_invalid_value_exits_2() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("cairn.toml"),
        "[catalog]\nworkers = 0\n",
    )
    .expect("write config");

    let output = cairn(&dir, &["--output", "json", "config", "validate"]);

    assert_eq!(output.status.code(), Some(2));
    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    assert!(
        json["errors"][0]
            .as_str()
            .expect("error message")
            .contains("catalog.workers")
    );
}

#[test]
fn test_config_validate_malformed_toml_exits_2() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("cairn.toml"), "[general\nlog_level = 1\n")
        .expect("write config");

    let output = cairn(&dir, &["config", "validate"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("INVALID"));
}

#[test]
fn test_config_show_defaults_without_file() {
    let dir = TempDir::new().expect("temp dir");
    let output = cairn(&dir, &["config", "show", "--section", "catalog"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[catalog]"));
    assert!(text.contains("workers = 4"), "stdout: {text}");
    assert!(text.contains("output_format = \"cyclonedx\""));
}

#[test]
fn test_invalid_config_fails_other_commands_with_exit_2() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("cairn.toml"),
        "[general]\nlog_level = \"loud\"\n",
    )
    .expect("write config");

    let output = cairn(&dir, &["purl", "build", "--name", "musl"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_log_level_flag_overrides_invalid_file_value() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("cairn.toml"),
        "[general]\nlog_level = \"loud\"\n",
    )
    .expect("write config");

    let output = cairn(
        &dir,
        &["--log-level", "warn", "purl", "build", "--name", "musl"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "pkg:alpine/musl\n");
}

#[test]
fn test_env_overrides_invalid_file_value() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("cairn.toml"), "[catalog]\nworkers = 0\n")
        .expect("write config");
    let input = fixture("installed.json");

    let output = Command::new(env!("CARGO_BIN_EXE_cairn"))
        .arg("-c")
        .arg(dir.path().join("cairn.toml"))
        .args(["-q", "--output", "json", "catalog", input.to_str().expect("utf-8 path")])
        .env("CAIRN_CATALOG_WORKERS", "8")
        .output()
        .expect("failed to run cairn binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_json(&output)["package_count"], 3);
}
