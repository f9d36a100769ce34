//! Custom widgets for the navigation TUI.

mod tree;

pub use tree::{NavTreeView, TreeViewState};
