#![no_main]

use libfuzzer_sys::fuzz_target;

use cairn_catalog::{PackageIdentity, PackageMetadata};

fuzz_target!(|data: &[u8]| {
    if let Ok(packages) = serde_json::from_slice::<Vec<PackageMetadata>>(data) {
        for package in packages.iter().take(100) {
            let _ = package.package_url();
            let _ = package.owned_files();
        }
    }
});
