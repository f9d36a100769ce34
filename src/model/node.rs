//! Runtime tree nodes.

use super::{NavEntry, NavTable, RowKind};
use std::fmt;

/// Index of a [`TreeNode`] in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena slot of this node.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host handles belonging to one node. Each is created at most once.
#[derive(Debug, Clone)]
pub struct RowVisual<K> {
    /// The rendered row (none for the root)
    pub row: Option<K>,
    /// The connector icon that doubles as expand toggle
    pub toggle_icon: Option<K>,
    /// Container holding the children's rows, created on first use
    pub child_list: Option<K>,
}

impl<K> Default for RowVisual<K> {
    fn default() -> Self {
        Self {
            row: None,
            toggle_icon: None,
            child_list: None,
        }
    }
}

/// One materialized navigation row.
#[derive(Debug, Clone)]
pub struct TreeNode<K> {
    pub(crate) label: String,
    pub(crate) link: Option<String>,
    pub(crate) depth: usize,
    pub(crate) is_last: bool,
    pub(crate) children: Vec<NodeId>,
    pub(crate) children_source: Option<NavTable>,
    pub(crate) children_visited: bool,
    pub(crate) expanded: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) visual: RowVisual<K>,
}

impl<K> TreeNode<K> {
    pub(crate) fn root(table: NavTable) -> Self {
        Self {
            label: String::new(),
            link: None,
            depth: 0,
            is_last: true,
            children: Vec::new(),
            children_source: Some(table),
            children_visited: false,
            expanded: false,
            parent: None,
            visual: RowVisual::default(),
        }
    }

    pub(crate) fn child(entry: &NavEntry, parent: NodeId, depth: usize, is_last: bool) -> Self {
        Self {
            label: entry.label.clone(),
            link: entry.link.clone(),
            depth,
            is_last,
            children: Vec::new(),
            children_source: entry.children.clone(),
            children_visited: false,
            expanded: false,
            parent: Some(parent),
            visual: RowVisual::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The node's link, ignoring empty strings.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.is_empty())
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub const fn is_last(&self) -> bool {
        self.is_last
    }

    /// Materialized children, in table order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub const fn children_source(&self) -> Option<&NavTable> {
        self.children_source.as_ref()
    }

    pub const fn children_visited(&self) -> bool {
        self.children_visited
    }

    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub const fn visual(&self) -> &RowVisual<K> {
        &self.visual
    }

    /// Whether the node can be expanded at all.
    pub fn has_children(&self) -> bool {
        self.children_source.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn row_kind(&self) -> RowKind<'_> {
        RowKind::classify(self.link(), self.children_source.as_ref())
    }
}
