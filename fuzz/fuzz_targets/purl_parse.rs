#![no_main]

use cairn_catalog::PackageUrl;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(purl) = input.parse::<PackageUrl>() {
            // 정규화된 출력은 다시 파싱되어야 하고, 재출력은 고정점이어야 함
            let canonical = purl.to_string();
            let reparsed: PackageUrl = canonical
                .parse()
                .expect("canonical purl must parse");
            assert_eq!(reparsed.to_string(), canonical);
        }
    }
});
