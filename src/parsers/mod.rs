//! Navigation table parsers.
//!
//! Documentation generators emit the sidebar as a nested array of
//! `[label, link, children]` triples, either as plain JSON or wrapped in
//! `var NAME = [...];` script assignments. Split outputs reference child
//! tables by name; [`TableLoader`] resolves those references from the
//! same input or from sibling files.
//!
//! ## Usage
//!
//! ```no_run
//! use navtree::parsers::{parse_table, TableLoader};
//! use std::path::Path;
//!
//! // A whole documentation set, references included
//! let table = TableLoader::load_path(Path::new("html/navtree.js"))?;
//!
//! // A self-contained table from memory
//! let inline = parse_table(r#"[["Main Page", "index.html", null]]"#)?;
//! assert_eq!(inline.len(), 1);
//! # Ok::<(), navtree::NavTreeError>(())
//! ```

mod loader;
mod table;

pub use loader::TableLoader;
pub use table::{
    RawChildren, RawEntry, TableBundle, TableSyntax, detect_syntax, parse_table_str,
};

use crate::error::Result;
use crate::model::NavTable;
use std::path::Path;

/// Parse a table from a file, resolving references next to it.
pub fn load_table(path: &Path) -> Result<NavTable> {
    TableLoader::load_path(path)
}

/// Parse a table from memory. References may only name tables defined in
/// the same input.
pub fn parse_table(content: &str) -> Result<NavTable> {
    TableLoader::new(Path::new("")).load_str(content, "<memory>")
}
