//! The host UI collaborator.
//!
//! The tree never draws anything itself. Every visual side effect goes
//! through the [`Host`] trait: creating containers, rows and icons,
//! attaching click handlers, showing and hiding child lists, highlighting
//! the selected row and scrolling it into view.
//!
//! Click handlers are not closures: a host stores the [`ClickAction`] it
//! was given and hands it back to [`crate::tree::NavTree::handle_click`]
//! when the user clicks. Animated effects are reported the same way:
//! `show`/`hide` return [`EffectStatus::Pending`] and the host later lists
//! the finished effect in [`Host::poll_finished`].
//!
//! [`Document`] is the in-crate host: an in-memory element tree used
//! headless by tests and the text renderer, and driven by the terminal UI.

mod document;
mod glyph;

pub use document::{DEFAULT_ANCHOR, Document, ElementId, ElementKind, VisibleRow};
pub use glyph::{Glyph, GlyphStyle};

use crate::error::Result;
use crate::model::NodeId;
use std::fmt;

/// Identifier of an in-flight visual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u64);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect-{}", self.0)
    }
}

/// Result of a show/hide request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStatus {
    /// The element is already in its final state
    Done,
    /// An animation is running; its completion is reported later
    Pending(EffectId),
}

/// How a child list is revealed or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reveal {
    /// Switch visibility at once (used for programmatic breadcrumb expansion)
    Immediate,
    /// Slide open or closed
    #[default]
    Slide,
}

/// What a click on an element should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Toggle the node's subtree
    Toggle(NodeId),
}

/// Vertical space available to the navigation panel, in host units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub window_height: u32,
    pub header_height: u32,
    pub footer_height: u32,
}

impl Viewport {
    pub const fn new(window_height: u32, header_height: u32, footer_height: u32) -> Self {
        Self {
            window_height,
            header_height,
            footer_height,
        }
    }

    /// Height left once header and footer are subtracted.
    pub const fn available_height(&self) -> u32 {
        self.window_height
            .saturating_sub(self.header_height)
            .saturating_sub(self.footer_height)
    }

    /// Scroll offset that places an element at the vertical center.
    pub const fn center_offset(&self) -> i64 {
        -((self.available_height() / 2) as i64)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(24, 1, 1)
    }
}

/// Host UI toolkit operations required by the tree.
pub trait Host {
    /// Opaque reference to a rendered element.
    type Handle: Clone + fmt::Debug;

    /// Create a container for the root's children inside the element
    /// whose id is `anchor`.
    fn attach_root(&mut self, anchor: &str) -> Result<Self::Handle>;

    /// Create the (initially hidden) container for a row's children.
    fn create_child_list(&mut self, row: &Self::Handle) -> Self::Handle;

    /// Append a row with a text label to a list.
    fn create_row(&mut self, list: &Self::Handle, label: &str) -> Self::Handle;

    /// Turn a row's label into a hyperlink.
    fn set_link(&mut self, row: &Self::Handle, href: &str);

    /// Append an icon to a row.
    fn create_icon(&mut self, row: &Self::Handle, glyph: Glyph) -> Self::Handle;

    /// Change an icon's image.
    fn set_icon(&mut self, icon: &Self::Handle, glyph: Glyph);

    /// Attach a click handler.
    fn on_click(&mut self, element: &Self::Handle, action: ClickAction);

    /// Make an element visible.
    fn show(&mut self, element: &Self::Handle, reveal: Reveal) -> EffectStatus;

    /// Hide an element.
    fn hide(&mut self, element: &Self::Handle, reveal: Reveal) -> EffectStatus;

    /// Highlight a row as the current page and give it a stable id.
    fn mark_selected(&mut self, row: &Self::Handle, id: &str);

    /// Current window, header and footer sizes.
    fn viewport(&self) -> Viewport;

    /// Scroll so that `element` sits at `offset` from the top of the panel.
    fn scroll_to(&mut self, element: &Self::Handle, offset: i64);

    /// Effects that finished since the last call.
    fn poll_finished(&mut self) -> Vec<EffectId>;
}
