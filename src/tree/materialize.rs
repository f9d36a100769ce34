//! Lazy creation of child rows.

use super::NavTree;
use crate::host::{ClickAction, Glyph, Host};
use crate::model::{NodeId, RowKind, RowVisual, TreeNode};
use std::fmt;

impl<K: Clone + fmt::Debug> NavTree<K> {
    /// Create the rows for a node's children.
    ///
    /// Runs at most once per node. Returns `false` without touching the
    /// host when the node is unknown, already materialized, or has nothing
    /// to materialize.
    pub fn materialize<H: Host<Handle = K>>(&mut self, id: NodeId, host: &mut H) -> bool {
        let Some(parent) = self.node(id) else {
            return false;
        };
        if parent.children_visited {
            tracing::debug!("{} already materialized", id);
            return false;
        }
        let Some(source) = parent.children_source.clone().filter(|s| !s.is_empty()) else {
            return false;
        };
        let depth = parent.depth + 1;
        let indent = self.indent_for_children(id);
        let Some(list) = self.ensure_child_list(id, host) else {
            tracing::warn!("{} has no row to hang children from", id);
            return false;
        };

        let last = source.len() - 1;
        let mut children = Vec::with_capacity(source.len());
        for (index, entry) in source.iter().enumerate() {
            let child = NodeId::new(self.nodes.len());
            let mut node = TreeNode::child(entry, id, depth, index == last);
            node.visual = self.render_row(child, &node, &list, &indent, host);
            self.nodes.push(node);
            children.push(child);
        }

        tracing::debug!("materialized {} children of {}", children.len(), id);
        let parent = &mut self.nodes[id.index()];
        parent.children = children;
        parent.children_visited = true;
        true
    }

    /// Indentation shared by all children of `parent`, outermost first.
    fn indent_for_children(&self, parent: NodeId) -> Vec<Glyph> {
        let mut glyphs = Vec::new();
        let mut cursor = self.node(parent);
        while let Some(node) = cursor {
            if node.is_root() {
                break;
            }
            glyphs.push(Glyph::indent(node.is_last));
            cursor = node.parent.and_then(|p| self.node(p));
        }
        glyphs.reverse();
        glyphs
    }

    pub(crate) fn ensure_child_list<H: Host<Handle = K>>(
        &mut self,
        id: NodeId,
        host: &mut H,
    ) -> Option<K> {
        let node = self.nodes.get_mut(id.index())?;
        if let Some(list) = &node.visual.child_list {
            return Some(list.clone());
        }
        let row = node.visual.row.clone()?;
        let list = host.create_child_list(&row);
        node.visual.child_list = Some(list.clone());
        Some(list)
    }

    fn render_row<H: Host<Handle = K>>(
        &self,
        id: NodeId,
        node: &TreeNode<K>,
        list: &K,
        indent: &[Glyph],
        host: &mut H,
    ) -> RowVisual<K> {
        let row = host.create_row(list, &node.label);
        for glyph in indent {
            host.create_icon(&row, *glyph);
        }

        let has_children = node.has_children();
        let icon = host.create_icon(&row, Glyph::connector(has_children, node.is_last));
        let toggle_icon = has_children.then(|| {
            host.on_click(&icon, ClickAction::Toggle(id));
            icon
        });

        match node.row_kind() {
            RowKind::Linked { target } => {
                host.set_link(&row, &format!("{}{}", self.options.relpath, target));
            }
            RowKind::Expandable { .. } => host.on_click(&row, ClickAction::Toggle(id)),
            RowKind::Leaf => {}
        }

        RowVisual {
            row: Some(row),
            toggle_icon,
            child_list: None,
        }
    }
}
