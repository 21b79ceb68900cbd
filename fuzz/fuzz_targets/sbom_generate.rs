#![no_main]

use std::time::{Duration, UNIX_EPOCH};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cairn_catalog::{
    ApkMetadata, CatalogEntry, Ecosystem, PackageIdentity, SbomFormat, SbomGenerator,
};

/// 퍼저용 SBOM 입력
#[derive(Arbitrary, Debug)]
struct FuzzSbomInput {
    spdx: bool,
    include_files: bool,
    created_secs: u32,
    packages: Vec<FuzzPackage>,
}

#[derive(Arbitrary, Debug)]
struct FuzzPackage {
    name: String,
    version: String,
    arch: String,
    files: Vec<String>,
}

fuzz_target!(|input: FuzzSbomInput| {
    // 패키지 수 제한 (퍼징 성능)
    let entries: Vec<CatalogEntry> = input
        .packages
        .iter()
        .take(100)
        .map(|p| {
            let package = ApkMetadata::new(&p.name, &p.version, &p.arch)
                .with_files(p.files.iter().take(32).cloned());
            CatalogEntry {
                ecosystem: Ecosystem::Alpine,
                name: package.name.clone(),
                version: package.version.clone(),
                purl: package.package_url(),
                owned_files: package.owned_files(),
            }
        })
        .collect();

    let format = if input.spdx {
        SbomFormat::Spdx
    } else {
        SbomFormat::CycloneDx
    };
    let created = UNIX_EPOCH + Duration::from_secs(u64::from(input.created_secs));

    let document = SbomGenerator::new(format)
        .include_files(input.include_files)
        .generate(&entries, created)
        .expect("sbom generation must not fail");

    assert_eq!(document.component_count, entries.len());
    let _: serde_json::Value =
        serde_json::from_str(&document.content).expect("sbom must be valid JSON");
});
