//! Data model for navigation trees.
//!
//! Two layers live here:
//!
//! - [`NavEntry`] / [`NavTable`]: the static, externally supplied table of
//!   `[label, link, children]` triples. Immutable and cheap to share.
//! - [`TreeNode`]: the runtime record for one materialized row, stored in
//!   the arena owned by [`crate::tree::NavTree`] and addressed by [`NodeId`].
//!
//! ```
//! use navtree::model::{NavEntry, NavTable, RowKind};
//!
//! let table = NavTable::from(vec![
//!     NavEntry::leaf("A", Some("a.html")),
//!     NavEntry::group("B", None, vec![NavEntry::leaf("B1", Some("b1.html"))]),
//! ]);
//!
//! assert!(matches!(table[0].row_kind(), RowKind::Linked { target: "a.html" }));
//! assert!(matches!(table[1].row_kind(), RowKind::Expandable { .. }));
//! ```

mod entry;
mod node;

pub use entry::*;
pub use node::*;
