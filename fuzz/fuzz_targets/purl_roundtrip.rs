#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use cairn_catalog::{ApkMetadata, PackageIdentity, PackageUrl};

/// 퍼저용 Alpine 패키지 식별 정보
#[derive(Arbitrary, Debug)]
struct FuzzIdentity {
    name: String,
    version: String,
    arch: String,
}

fuzz_target!(|input: FuzzIdentity| {
    let package = ApkMetadata::new(&input.name, &input.version, &input.arch);
    let purl = package.package_url();

    assert!(purl.starts_with("pkg:alpine/"));
    assert!(!purl.contains(' '), "space must be percent-encoded: {purl}");

    // 이름이 비어 있으면 엄격한 파서는 거부함
    if input.name.is_empty() {
        return;
    }

    let parsed: PackageUrl = purl.parse().expect("built purl must parse");
    assert_eq!(parsed.ty(), "alpine");
    assert_eq!(parsed.name(), input.name);
    assert_eq!(parsed.version().unwrap_or(""), input.version);
    assert_eq!(parsed.qualifier("arch").unwrap_or(""), input.arch);
    assert_eq!(parsed.to_string(), purl);
});
