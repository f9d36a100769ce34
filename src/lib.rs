//! **Lazy-loading navigation trees for generated documentation.**
//!
//! `navtree` builds the expandable contents tree shown beside every page of a
//! generated documentation site. The tree is described by a static
//! navigation table of `[label, link, children]` triples; rows are created
//! only when their parent is first opened, and on page load the tree walks
//! down to the current page, opening each level and highlighting the match.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the static [`NavTable`] and the runtime [`TreeNode`] arena records.
//! - **[`tree`]**: [`NavTree`], which materializes rows, expands and collapses
//!   subtrees, and resolves the current page to an index path.
//! - **[`host`]**: the [`Host`] trait the tree draws through, plus
//!   [`Document`], an in-memory host used by the CLI, the TUI and tests.
//! - **[`parsers`]**: reading tables from `navtree.js` style scripts or JSON,
//!   including split tables spread over several files.
//! - **[`pipeline`]**: load → build → render stages shared by the commands.
//! - **[`tui`]**: an interactive terminal browser.
//!
//! ## Getting Started
//!
//! ```
//! use navtree::{Document, GlyphStyle, NavTree, TreeOptions, parse_table};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = parse_table(
//!         r#"var NAVTREE = [
//!             [ "Main Page", "index.html", null ],
//!             [ "Modules", "modules.html", [ [ "Graph", "graph.html", null ] ] ]
//!         ];"#,
//!     )?;
//!
//!     let mut document = Document::new();
//!     let tree = NavTree::init(table, TreeOptions::new("graph.html"), &mut document)?;
//!
//!     assert_eq!(tree.breadcrumb(), Some(&[1, 0][..]));
//!     assert_eq!(
//!         document.render_text(GlyphStyle::Ascii),
//!         "|- Main Page\n`v Modules\n   `- Graph <=\n"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Loading a table from disk
//!
//! Split tables (`[ "Modules", "modules.html", "modules" ]`) are resolved
//! from files next to the main table.
//!
//! ```no_run
//! use std::path::Path;
//! use navtree::load_table;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load_table(Path::new("html/navtree.js"))?;
//!     println!("{} top-level entries", table.len());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Row counts and terminal coordinates are converted between usize/u16/u32/i64
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod tree;
pub mod tui;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, OutputConfig, TreeConfig, TuiConfig};
pub use config::{ConfigError, Validatable};
pub use config::{FindConfig, ViewConfig};
pub use error::{NavTreeError, Result};
pub use host::{ClickAction, Document, EffectStatus, Glyph, GlyphStyle, Host, Reveal, Viewport};
pub use model::{NavEntry, NavTable, NodeId, RowKind, TreeNode};
pub use parsers::{TableLoader, load_table, parse_table};
pub use tree::{NavTree, ToggleOutcome, TreeOptions, find_path, find_path_or_fallback};
