//! Expand and collapse.

use super::{InFlight, Motion, NavTree};
use crate::host::{EffectStatus, Glyph, Host, Reveal};
use crate::model::NodeId;
use std::fmt;

/// What a toggle request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The subtree was shown
    Expanded(EffectStatus),
    /// The subtree was hidden
    Collapsed(EffectStatus),
    /// The node was already in the requested state, or is the root
    Unchanged,
    /// The node has no children to show
    Leaf,
    /// A slide on this node is still running; the request was ignored
    Busy,
    /// No such node
    UnknownNode,
}

impl<K: Clone + fmt::Debug> NavTree<K> {
    /// Flip a node between expanded and collapsed, sliding the change.
    pub fn toggle<H: Host<Handle = K>>(&mut self, id: NodeId, host: &mut H) -> ToggleOutcome {
        if let Err(outcome) = self.check_toggle(id) {
            return outcome;
        }
        if self.nodes[id.index()].expanded {
            self.collapse(id, host)
        } else {
            self.expand(id, Reveal::Slide, host)
        }
    }

    /// Show a node's children, materializing them on first use.
    pub fn expand<H: Host<Handle = K>>(
        &mut self,
        id: NodeId,
        reveal: Reveal,
        host: &mut H,
    ) -> ToggleOutcome {
        if let Err(outcome) = self.check_toggle(id) {
            return outcome;
        }
        self.reveal(id, reveal, host)
            .map_or(ToggleOutcome::Unchanged, ToggleOutcome::Expanded)
    }

    /// Hide a node's children. Materialized rows are kept.
    pub fn collapse<H: Host<Handle = K>>(&mut self, id: NodeId, host: &mut H) -> ToggleOutcome {
        if let Err(outcome) = self.check_toggle(id) {
            return outcome;
        }
        let node = &self.nodes[id.index()];
        if !node.expanded {
            return ToggleOutcome::Unchanged;
        }
        let Some(list) = node.visual.child_list.clone() else {
            return ToggleOutcome::Unchanged;
        };

        let status = host.hide(&list, Reveal::Slide);
        let node = &mut self.nodes[id.index()];
        node.expanded = false;
        if let Some(icon) = &node.visual.toggle_icon {
            host.set_icon(icon, Glyph::toggle(false, node.is_last));
        }
        self.track(status, id, Motion::Close);
        tracing::debug!("collapsed {}", id);
        ToggleOutcome::Collapsed(status)
    }

    /// Expand without the toggle checks. `None` when nothing changed.
    pub(crate) fn reveal<H: Host<Handle = K>>(
        &mut self,
        id: NodeId,
        reveal: Reveal,
        host: &mut H,
    ) -> Option<EffectStatus> {
        let node = self.node(id)?;
        if !node.has_children() || node.expanded {
            return None;
        }
        if !node.children_visited {
            self.materialize(id, host);
        }
        let list = self.ensure_child_list(id, host)?;

        let status = host.show(&list, reveal);
        let node = &mut self.nodes[id.index()];
        node.expanded = true;
        if let Some(icon) = &node.visual.toggle_icon {
            host.set_icon(icon, Glyph::toggle(true, node.is_last));
        }
        self.track(status, id, Motion::Open);
        tracing::debug!("expanded {}", id);
        Some(status)
    }

    fn check_toggle(&self, id: NodeId) -> Result<(), ToggleOutcome> {
        let Some(node) = self.node(id) else {
            return Err(ToggleOutcome::UnknownNode);
        };
        if node.is_root() {
            return Err(ToggleOutcome::Unchanged);
        }
        if !node.has_children() {
            return Err(ToggleOutcome::Leaf);
        }
        if self.is_busy(id) {
            tracing::debug!("ignoring toggle of {} while its slide runs", id);
            return Err(ToggleOutcome::Busy);
        }
        Ok(())
    }

    fn track(&mut self, status: EffectStatus, node: NodeId, motion: Motion) {
        if let EffectStatus::Pending(effect) = status {
            self.in_flight.insert(effect, InFlight { node, motion });
        }
    }
}
