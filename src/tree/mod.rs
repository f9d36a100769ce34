//! The navigation tree widget.
//!
//! [`NavTree`] owns the arena of materialized [`TreeNode`]s and drives a
//! [`Host`] to render them. One tree is built per page load:
//!
//! 1. [`NavTree::init`] attaches the root to the host's anchor container
//!    and materializes the top level.
//! 2. [`find_path_or_fallback`] resolves the current page (or the index
//!    page) to a breadcrumb path.
//! 3. A [`BreadcrumbPlan`] expands every ancestor without animation,
//!    selects the final row and centers it in the viewport.
//!
//! After that the tree reacts to clicks ([`NavTree::handle_click`]) and
//! to finished host animations ([`NavTree::pump`]).
//!
//! ```
//! use navtree::host::{Document, GlyphStyle};
//! use navtree::model::{NavEntry, NavTable};
//! use navtree::tree::{NavTree, TreeOptions};
//!
//! let table = NavTable::from(vec![
//!     NavEntry::leaf("A", Some("a.html")),
//!     NavEntry::group("B", None, vec![NavEntry::leaf("B1", Some("b1.html"))]),
//! ]);
//! let mut doc = Document::new();
//! let tree = NavTree::init(table, TreeOptions::new("b1.html"), &mut doc)?;
//!
//! assert_eq!(tree.breadcrumb(), Some(&[1, 0][..]));
//! assert_eq!(doc.render_text(GlyphStyle::Ascii), "|- A\n`v B\n   `- B1 <=\n");
//! # Ok::<(), navtree::NavTreeError>(())
//! ```

mod breadcrumb;
mod expansion;
mod materialize;
mod resolver;

pub use breadcrumb::{BreadcrumbPlan, PlanStep};
pub use expansion::ToggleOutcome;
pub use resolver::{find_path, find_path_or_fallback};

use crate::error::Result;
use crate::host::{ClickAction, DEFAULT_ANCHOR, EffectId, EffectStatus, Host, Reveal};
use crate::model::{NavTable, NodeId, TreeNode};
use std::collections::HashMap;
use std::fmt;

/// Page used when the current page is not in the table.
pub const DEFAULT_INDEX_PAGE: &str = "index.html";

/// Id given to the selected row.
pub const SELECTED_ID: &str = "selected";

/// Per-page settings for a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Identifier of the current page, compared against entry links
    pub page: String,
    /// Prefix prepended to links and icon images
    pub relpath: String,
    /// Fallback page identifier
    pub index_page: String,
    /// Id of the host container the tree attaches to
    pub anchor: String,
}

impl TreeOptions {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            relpath: String::new(),
            index_page: DEFAULT_INDEX_PAGE.to_string(),
            anchor: DEFAULT_ANCHOR.to_string(),
        }
    }

    #[must_use]
    pub fn relpath(mut self, relpath: impl Into<String>) -> Self {
        self.relpath = relpath.into();
        self
    }

    #[must_use]
    pub fn index_page(mut self, index_page: impl Into<String>) -> Self {
        self.index_page = index_page.into();
        self
    }

    #[must_use]
    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    node: NodeId,
    motion: Motion,
}

/// A lazily materialized navigation tree bound to a host.
///
/// `K` is the host's element handle type.
#[derive(Debug)]
pub struct NavTree<K> {
    table: NavTable,
    options: TreeOptions,
    nodes: Vec<TreeNode<K>>,
    breadcrumb: Option<Vec<usize>>,
    selected: Option<NodeId>,
    in_flight: HashMap<EffectId, InFlight>,
    parked: Option<(EffectId, BreadcrumbPlan)>,
}

impl<K: Clone + fmt::Debug> NavTree<K> {
    /// Build the tree for one page and run its breadcrumb walk.
    ///
    /// A page missing from the table is not an error: the index page is
    /// tried next, and if that is missing too the tree stays collapsed.
    ///
    /// The root's expanded flag only says its top level is attached; it is
    /// set whenever the table has rows, whether or not a page was found.
    pub fn init<H: Host<Handle = K>>(
        table: NavTable,
        options: TreeOptions,
        host: &mut H,
    ) -> Result<Self> {
        let list = host.attach_root(&options.anchor)?;
        let mut root = TreeNode::root(table.clone());
        root.visual.child_list = Some(list);

        let mut tree = Self {
            table,
            options,
            nodes: vec![root],
            breadcrumb: None,
            selected: None,
            in_flight: HashMap::new(),
            parked: None,
        };

        tree.materialize(NodeId::ROOT, host);
        // Top level is always attached visible, so the root is never collapsed.
        let root = &mut tree.nodes[NodeId::ROOT.index()];
        root.expanded = root.children_visited;

        tree.breadcrumb =
            find_path_or_fallback(&tree.options.page, &tree.options.index_page, &tree.table);
        match tree.breadcrumb.clone() {
            Some(path) if !path.is_empty() => {
                tracing::debug!("breadcrumb for '{}': {:?}", tree.options.page, path);
                tree.run_plan(BreadcrumbPlan::new(&path), host);
            }
            _ => {
                tracing::debug!(
                    "neither '{}' nor '{}' found; tree stays collapsed",
                    tree.options.page,
                    tree.options.index_page
                );
            }
        }
        Ok(tree)
    }

    pub const fn table(&self) -> &NavTable {
        &self.table
    }

    pub const fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Number of materialized nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode<K>> {
        self.nodes.get(id.index())
    }

    pub fn root(&self) -> &TreeNode<K> {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// All materialized nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TreeNode<K>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Index path resolved for the current page (or the fallback page).
    pub fn breadcrumb(&self) -> Option<&[usize]> {
        self.breadcrumb.as_deref()
    }

    /// The node marked as the current page.
    pub const fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Follow an index path through materialized nodes.
    pub fn node_at_path(&self, path: &[usize]) -> Option<NodeId> {
        path.iter().try_fold(NodeId::ROOT, |id, &index| {
            self.node(id)?.children.get(index).copied()
        })
    }

    /// Ancestors of a node, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        std::iter::successors(self.node(id).and_then(TreeNode::parent), |p| {
            self.node(*p).and_then(TreeNode::parent)
        })
        .collect()
    }

    /// Whether a slide on this node's subtree is still running.
    pub fn is_busy(&self, id: NodeId) -> bool {
        self.in_flight.values().any(|f| f.node == id)
    }

    /// No running effects and no parked breadcrumb walk.
    pub fn is_settled(&self) -> bool {
        self.in_flight.is_empty() && self.parked.is_none()
    }

    /// Dispatch a click the host received.
    pub fn handle_click<H: Host<Handle = K>>(
        &mut self,
        action: ClickAction,
        host: &mut H,
    ) -> ToggleOutcome {
        match action {
            ClickAction::Toggle(id) => self.toggle(id, host),
        }
    }

    /// Feed finished host effects back into the tree.
    pub fn pump<H: Host<Handle = K>>(&mut self, host: &mut H) {
        for effect in host.poll_finished() {
            self.complete_effect(effect, host);
        }
    }

    /// Handle one finished effect.
    ///
    /// A finished slide-open re-centers the selected row. A parked
    /// breadcrumb walk waiting on this effect resumes.
    pub fn complete_effect<H: Host<Handle = K>>(&mut self, effect: EffectId, host: &mut H) {
        if let Some(done) = self.in_flight.remove(&effect) {
            tracing::debug!("{} finished for {}", effect, done.node);
            if done.motion == Motion::Open {
                self.center_selected(host);
            }
        }
        if let Some((waiting, plan)) = self.parked.take() {
            if waiting == effect {
                self.run_plan(plan, host);
            } else {
                self.parked = Some((waiting, plan));
            }
        }
    }

    fn run_plan<H: Host<Handle = K>>(&mut self, mut plan: BreadcrumbPlan, host: &mut H) {
        while let Some(step) = plan.next_step() {
            match step {
                PlanStep::Expand { index } => {
                    let cursor = plan.cursor();
                    let Some(child) = self
                        .node(cursor)
                        .and_then(|node| node.children.get(index).copied())
                    else {
                        tracing::warn!("breadcrumb index {} missing under {}", index, cursor);
                        plan.abandon();
                        break;
                    };
                    plan.move_to(child);
                    if let Some(EffectStatus::Pending(effect)) =
                        self.reveal(child, Reveal::Immediate, host)
                    {
                        self.parked = Some((effect, plan));
                        return;
                    }
                }
                PlanStep::Select => self.select(plan.cursor(), host),
                PlanStep::CenterSelected => self.center_selected(host),
            }
        }
    }

    fn select<H: Host<Handle = K>>(&mut self, id: NodeId, host: &mut H) {
        let Some(row) = self.node(id).and_then(|n| n.visual.row.clone()) else {
            return;
        };
        host.mark_selected(&row, SELECTED_ID);
        self.selected = Some(id);
    }

    fn center_selected<H: Host<Handle = K>>(&self, host: &mut H) {
        let Some(row) = self
            .selected
            .and_then(|id| self.node(id))
            .and_then(|n| n.visual.row.clone())
        else {
            return;
        };
        let offset = host.viewport().center_offset();
        host.scroll_to(&row, offset);
    }
}

impl<K: PartialEq> NavTree<K> {
    /// The node rendered as `row`.
    pub fn node_for_row(&self, row: &K) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.visual.row.as_ref() == Some(row))
            .map(NodeId::new)
    }
}
