//! `ViewApp` - interactive browser over a navigation table.
//!
//! Each page is a fresh [`NavTree`] bound to an animated [`Document`];
//! following a link rebuilds both for the linked page.

use crate::config::{TreeConfig, TuiConfig};
use crate::host::{Document, ElementId, Host, Viewport, VisibleRow};
use crate::model::NavTable;
use crate::tree::{NavTree, ToggleOutcome};
use crate::tui::widgets::TreeViewState;

/// Main application state for the tree browser.
pub struct ViewApp {
    /// The table being browsed
    pub(crate) table: NavTable,

    /// Settings used to build a tree for each page
    pub(crate) tree_config: TreeConfig,

    /// Host document for the current page
    pub(crate) document: Document,

    /// Tree for the current page
    pub(crate) tree: NavTree<ElementId>,

    /// Cursor and scroll position
    pub(crate) view: TreeViewState,

    /// Rows a slide reveals or hides per tick
    pub(crate) rows_per_tick: usize,

    /// Last scroll request taken from the document
    seen_scroll: u64,

    /// Terminal rows around the tree panel
    header_height: u32,
    footer_height: u32,

    /// Pages visited before the current one
    pub(crate) history: Vec<String>,

    /// Status message to display temporarily
    pub(crate) status_message: Option<String>,

    /// Should quit
    pub(crate) should_quit: bool,
}

impl ViewApp {
    /// Open `page` of `table`.
    pub fn new(
        table: NavTable,
        tree_config: TreeConfig,
        page: &str,
        tui: &TuiConfig,
    ) -> crate::Result<Self> {
        let (document, tree) = Self::open(&table, &tree_config, page, Viewport::default())?;
        let mut app = Self {
            table,
            tree_config,
            document,
            tree,
            view: TreeViewState::new(),
            rows_per_tick: tui.slide_rows_per_tick.max(1),
            seen_scroll: 0,
            // The tree panel's border takes one more row on each side.
            header_height: u32::from(tui.header_height) + 1,
            footer_height: u32::from(tui.footer_height) + 1,
            history: Vec::new(),
            status_message: None,
            should_quit: false,
        };
        app.focus_selected();
        Ok(app)
    }

    fn open(
        table: &NavTable,
        tree_config: &TreeConfig,
        page: &str,
        viewport: Viewport,
    ) -> crate::Result<(Document, NavTree<ElementId>)> {
        let mut document = Document::with_anchor(&tree_config.anchor).animated(true);
        document.set_viewport(viewport);
        let tree = NavTree::init(table.clone(), tree_config.options_for(page), &mut document)?;
        Ok((document, tree))
    }

    /// The page the tree was built for.
    pub fn page(&self) -> &str {
        &self.tree.options().page
    }

    /// Rows currently on screen.
    pub fn rows(&self) -> Vec<VisibleRow> {
        self.document.visible_rows()
    }

    fn cursor_row(&self) -> Option<VisibleRow> {
        self.rows().into_iter().nth(self.view.cursor)
    }

    /// Labels from the top level down to the current page.
    pub fn breadcrumb_labels(&self) -> Vec<String> {
        let Some(selected) = self.tree.selected() else {
            return Vec::new();
        };
        let mut labels: Vec<String> = std::iter::once(selected)
            .chain(self.tree.ancestors(selected))
            .filter_map(|id| self.tree.node(id))
            .filter(|node| !node.is_root())
            .map(|node| node.label().to_string())
            .collect();
        labels.reverse();
        labels
    }

    /// Whether any slide is still running.
    pub fn is_animating(&self) -> bool {
        self.document.has_pending_effects() || !self.tree.is_settled()
    }

    // ------------------------------------------------------------------
    // Host loop
    // ------------------------------------------------------------------

    /// Advance running slides and apply finished effects.
    pub fn tick(&mut self) {
        if self.document.has_pending_effects() {
            self.document.advance(self.rows_per_tick);
        }
        self.tree.pump(&mut self.document);
        self.sync_scroll();
    }

    /// Track the terminal size so centering uses the real panel height.
    pub fn resize(&mut self, height: u16) {
        self.document.set_viewport(Viewport::new(
            u32::from(height),
            self.header_height,
            self.footer_height,
        ));
    }

    /// Put the cursor on the current page's row and adopt the tree's scroll.
    fn focus_selected(&mut self) {
        self.seen_scroll = self.document.scroll_generation();
        let rows = self.rows();
        self.view.visible_count = rows.len();
        let top = self.document.scroll_top().min(rows.len().saturating_sub(1));
        let cursor = rows.iter().position(|r| r.selected).unwrap_or(0);
        self.view.jump(cursor, top);
    }

    /// Apply a scroll request the tree made since the last call.
    ///
    /// The cursor stays where it is while it remains on screen; otherwise
    /// it moves to the current page's row.
    fn sync_scroll(&mut self) {
        let generation = self.document.scroll_generation();
        if generation == self.seen_scroll {
            return;
        }
        self.seen_scroll = generation;
        let rows = self.rows();
        let top = self.document.scroll_top().min(rows.len().saturating_sub(1));
        let height = match self.view.height {
            0 => self.document.viewport().available_height() as usize,
            rendered => rendered,
        };
        if self.view.cursor >= top && self.view.cursor < top + height {
            self.view.offset = top;
        } else {
            let cursor = rows.iter().position(|r| r.selected).unwrap_or(top);
            self.view.jump(cursor, top);
        }
        self.view.visible_count = rows.len();
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn navigate_up(&mut self) {
        self.view.select_prev();
    }

    pub fn navigate_down(&mut self) {
        self.view.visible_count = self.rows().len();
        self.view.select_next();
    }

    pub fn go_first(&mut self) {
        self.view.select_first();
    }

    pub fn go_last(&mut self) {
        self.view.visible_count = self.rows().len();
        self.view.select_last();
    }

    pub fn page_up(&mut self) {
        self.view.page_up();
    }

    pub fn page_down(&mut self) {
        self.view.visible_count = self.rows().len();
        self.view.page_down();
    }

    /// Move the cursor to the row of the current page.
    pub fn jump_to_selected(&mut self) {
        match self.rows().iter().position(|r| r.selected) {
            Some(index) => self.view.cursor = index,
            None => self.set_status_message("Current page is not in the tree"),
        }
    }

    /// Follow the cursor row's link, or toggle it when it has none.
    pub fn activate(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        if let Some(href) = row.href.as_deref() {
            let page = href
                .strip_prefix(self.tree_config.relpath.as_str())
                .unwrap_or(href)
                .to_string();
            self.follow(&page);
        } else if let Some(action) = row.toggle {
            let outcome = self.tree.handle_click(action, &mut self.document);
            self.report(outcome);
        }
    }

    /// Toggle the cursor row regardless of its link.
    pub fn toggle(&mut self) {
        if let Some(action) = self.cursor_row().and_then(|row| row.toggle) {
            let outcome = self.tree.handle_click(action, &mut self.document);
            self.report(outcome);
        }
    }

    /// Expand the cursor row, or step into it when already open.
    pub fn expand(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        let Some(node) = self.tree.node_for_row(&row.element) else {
            return;
        };
        if row.is_expanded() {
            self.navigate_down();
            return;
        }
        if row.is_expandable() {
            let outcome = self.tree.toggle(node, &mut self.document);
            self.report(outcome);
        }
    }

    /// Collapse the cursor row, or move to its parent when it is closed.
    pub fn collapse(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        let Some(node) = self.tree.node_for_row(&row.element) else {
            return;
        };
        if row.is_expanded() {
            let outcome = self.tree.collapse(node, &mut self.document);
            self.report(outcome);
            return;
        }
        let parent_row = self
            .tree
            .node(node)
            .and_then(|n| n.parent())
            .and_then(|p| self.tree.node(p))
            .and_then(|p| p.visual().row);
        if let Some(parent_row) = parent_row
            && let Some(index) = self.rows().iter().position(|r| r.element == parent_row)
        {
            self.view.cursor = index;
        }
    }

    /// Rebuild the tree for `page`, remembering the current one.
    pub fn follow(&mut self, page: &str) {
        let previous = self.page().to_string();
        if self.load_page(page) {
            self.history.push(previous);
        }
    }

    /// Return to the previously visited page.
    pub fn go_back(&mut self) -> bool {
        let Some(page) = self.history.pop() else {
            self.set_status_message("No previous page");
            return false;
        };
        self.load_page(&page)
    }

    fn load_page(&mut self, page: &str) -> bool {
        match Self::open(&self.table, &self.tree_config, page, self.document.viewport()) {
            Ok((document, tree)) => {
                tracing::debug!("opened page {}", page);
                self.document = document;
                self.tree = tree;
                self.view = TreeViewState {
                    height: self.view.height,
                    ..TreeViewState::new()
                };
                self.focus_selected();
                if self.tree.selected().is_none() {
                    self.set_status_message(format!("{page} is not in the tree"));
                } else {
                    self.clear_status_message();
                }
                true
            }
            Err(err) => {
                self.set_status_message(format!("Cannot open {page}: {err}"));
                false
            }
        }
    }

    fn report(&mut self, outcome: ToggleOutcome) {
        match outcome {
            ToggleOutcome::Busy => self.set_status_message("Still animating"),
            ToggleOutcome::UnknownNode => self.set_status_message("Row is no longer in the tree"),
            _ => {}
        }
        self.tick();
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    pub fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }
}
