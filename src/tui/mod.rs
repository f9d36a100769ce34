//! Terminal browser for navigation tables.
//!
//! Rows are drawn from a [`Document`](crate::host::Document) driven by a
//! [`NavTree`](crate::tree::NavTree), so expanding, collapsing and the
//! page-load breadcrumb walk behave exactly as they do for any other host.

mod app;
pub mod events;
pub mod theme;
mod ui;
pub mod widgets;

pub use app::ViewApp;
pub use ui::run_view_tui;
