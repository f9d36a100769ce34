#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the JSON/script syntax sniffing that runs before parsing.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = navtree::parsers::detect_syntax(s);
    }
});
