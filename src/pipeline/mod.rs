//! Pipeline orchestration for navtree operations.
//!
//! Shared load → build → render stages used by the CLI command handlers.

mod load;
mod output;
mod render;

pub use load::{LoadedTable, load_table_with_context};
pub use output::{OutputFormat, OutputTarget, color_enabled};
pub use render::{BreadcrumbReport, SnapshotRow, TreeSnapshot, build_document, render_tree};

/// Exit codes for scripting
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// The requested page (and its fallback) is not in the table
    pub const NOT_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}
