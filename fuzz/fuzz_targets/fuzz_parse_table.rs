#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz table parsing, scripts and bare JSON alike.
///
/// Anything that parses must also build a tree without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(table) = navtree::parse_table(s)
    {
        let mut document = navtree::Document::new();
        let _ = navtree::NavTree::init(table, navtree::TreeOptions::new("index.html"), &mut document);
    }
});
