#![no_main]

use libfuzzer_sys::fuzz_target;

use cairn_catalog::ownership::owned_paths;

fuzz_target!(|paths: Vec<String>| {
    let owned = owned_paths(paths.iter().map(String::as_str));

    assert!(owned.iter().all(|p| !p.is_empty()));
    assert!(owned.windows(2).all(|w| w[0].as_bytes() < w[1].as_bytes()));
    for path in paths.iter().filter(|p| !p.is_empty()) {
        assert!(owned.binary_search(path).is_ok(), "missing {path:?}");
    }
});
