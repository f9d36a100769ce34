//! In-memory element tree implementing [`Host`].

use super::{ClickAction, EffectId, EffectStatus, Glyph, GlyphStyle, Host, Reveal, Viewport};
use crate::error::{NavTreeError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Id of the container a documentation page provides for its sidebar.
pub const DEFAULT_ANCHOR: &str = "nav-tree-contents";

/// Handle of an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Pre-existing page container (an anchor)
    Container,
    /// List of rows
    List,
    /// A navigation row
    Row,
    /// An icon inside a row
    Icon,
}

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    hidden: bool,
    label: String,
    href: Option<String>,
    glyph: Option<Glyph>,
    click: Option<ClickAction>,
    selected: bool,
    /// Rows currently uncovered while a slide runs
    reveal: Option<usize>,
}

impl Element {
    const fn new(kind: ElementKind, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            hidden: false,
            label: String::new(),
            href: None,
            glyph: None,
            click: None,
            selected: false,
            reveal: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slide {
    Open,
    Close,
}

#[derive(Debug, Clone)]
struct PendingEffect {
    id: EffectId,
    list: ElementId,
    slide: Slide,
    shown: usize,
}

/// A row as it currently appears on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleRow {
    #[serde(skip)]
    pub element: ElementId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Indentation glyphs followed by the row's own connector
    pub glyphs: Vec<Glyph>,
    #[serde(skip)]
    pub toggle: Option<ClickAction>,
    pub selected: bool,
    /// Nesting level, 1 for top-level rows
    pub depth: usize,
}

impl VisibleRow {
    /// The row's own connector glyph.
    pub fn connector(&self) -> Option<Glyph> {
        self.glyphs.last().copied()
    }

    pub fn is_expandable(&self) -> bool {
        self.connector().is_some_and(Glyph::is_toggle)
    }

    pub fn is_expanded(&self) -> bool {
        self.connector().is_some_and(Glyph::is_expanded)
    }

    /// Glyphs and label as one line of text.
    pub fn to_text(&self, style: GlyphStyle) -> String {
        let mut line: String = self.glyphs.iter().map(|g| style.symbol(*g)).collect();
        line.push_str(&self.label);
        if self.selected {
            line.push_str(" <=");
        }
        line
    }
}

/// In-memory host document.
///
/// Without animation every show/hide completes at once. With animation,
/// slides progress through [`Document::advance`] and finished effects are
/// reported by [`Host::poll_finished`].
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    ids: HashMap<String, ElementId>,
    root_lists: Vec<ElementId>,
    viewport: Viewport,
    scroll_top: usize,
    scroll_generation: u64,
    animate: bool,
    pending: Vec<PendingEffect>,
    finished: Vec<EffectId>,
    next_effect: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with a single [`DEFAULT_ANCHOR`] container.
    pub fn new() -> Self {
        Self::with_anchor(DEFAULT_ANCHOR)
    }

    /// A document with a single container named `anchor`.
    pub fn with_anchor(anchor: &str) -> Self {
        let mut doc = Self {
            elements: Vec::new(),
            ids: HashMap::new(),
            root_lists: Vec::new(),
            viewport: Viewport::default(),
            scroll_top: 0,
            scroll_generation: 0,
            animate: false,
            pending: Vec::new(),
            finished: Vec::new(),
            next_effect: 0,
        };
        let container = doc.push(Element::new(ElementKind::Container, None));
        doc.ids.insert(anchor.to_string(), container);
        doc
    }

    /// Enable or disable slide animations.
    #[must_use]
    pub const fn animated(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub const fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Bumped on every scroll request, so drivers can tell a new request apart.
    pub const fn scroll_generation(&self) -> u64 {
        self.scroll_generation
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.get(id).map(|e| e.kind)
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|e| e.label.as_str())
    }

    pub fn href(&self, id: ElementId) -> Option<&str> {
        self.get(id).and_then(|e| e.href.as_deref())
    }

    pub fn glyph(&self, id: ElementId) -> Option<Glyph> {
        self.get(id).and_then(|e| e.glyph)
    }

    pub fn click_action(&self, id: ElementId) -> Option<ClickAction> {
        self.get(id).and_then(|e| e.click)
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.get(id).is_none_or(|e| e.hidden)
    }

    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Rows directly inside a list.
    pub fn rows_in(&self, list: ElementId) -> Vec<ElementId> {
        self.children_of(list)
            .iter()
            .copied()
            .filter(|c| self.kind(*c) == Some(ElementKind::Row))
            .collect()
    }

    /// The child list of a row, if one was created.
    pub fn child_list_of(&self, row: ElementId) -> Option<ElementId> {
        self.children_of(row)
            .iter()
            .copied()
            .find(|c| self.kind(*c) == Some(ElementKind::List))
    }

    /// Glyphs of a row, in display order.
    pub fn glyphs_of(&self, row: ElementId) -> Vec<Glyph> {
        self.children_of(row)
            .iter()
            .filter_map(|c| self.glyph(*c))
            .collect()
    }

    /// Look an element up by its id attribute.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    pub fn has_pending_effects(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Progress running slides by `rows` rows.
    pub fn advance(&mut self, rows: usize) {
        let mut still_running = Vec::with_capacity(self.pending.len());
        for mut effect in std::mem::take(&mut self.pending) {
            let done = match effect.slide {
                Slide::Open => {
                    effect.shown = effect.shown.saturating_add(rows);
                    effect.shown >= self.count_rows(effect.list)
                }
                Slide::Close => {
                    effect.shown = effect.shown.saturating_sub(rows);
                    effect.shown == 0
                }
            };
            if done {
                self.settle(&effect);
                self.finished.push(effect.id);
            } else {
                if let Some(list) = self.get_mut(effect.list) {
                    list.reveal = Some(effect.shown);
                }
                still_running.push(effect);
            }
        }
        self.pending = still_running;
    }

    /// Complete every running slide at once.
    pub fn finish_effects(&mut self) {
        for effect in std::mem::take(&mut self.pending) {
            self.settle(&effect);
            self.finished.push(effect.id);
        }
    }

    /// Rows currently on screen, top to bottom.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        for list in &self.root_lists {
            if !self.is_hidden(*list) {
                self.collect_rows(*list, 1, &mut rows);
            }
        }
        rows
    }

    /// Visible rows as text, one per line.
    pub fn render_text(&self, style: GlyphStyle) -> String {
        let mut out = String::new();
        for row in self.visible_rows() {
            let _ = writeln!(out, "{}", row.to_text(style));
        }
        out
    }

    fn collect_rows(&self, list: ElementId, depth: usize, out: &mut Vec<VisibleRow>) {
        let Some(element) = self.get(list) else {
            return;
        };
        let limit = element.reveal.unwrap_or(usize::MAX);
        let start = out.len();
        for row in self.rows_in(list) {
            if out.len() - start >= limit {
                break;
            }
            out.push(self.visible_row(row, depth));
            if let Some(child_list) = self.child_list_of(row)
                && !self.is_hidden(child_list)
            {
                self.collect_rows(child_list, depth + 1, out);
            }
        }
        out.truncate(start.saturating_add(limit));
    }

    fn visible_row(&self, row: ElementId, depth: usize) -> VisibleRow {
        let element = &self.elements[row.0];
        let toggle = element.click.or_else(|| {
            element
                .children
                .iter()
                .find_map(|c| self.click_action(*c))
        });
        VisibleRow {
            element: row,
            label: element.label.clone(),
            href: element.href.clone(),
            glyphs: self.glyphs_of(row),
            toggle,
            selected: element.selected,
            depth,
        }
    }

    /// Rows a list shows when fully open, nested open lists included.
    fn count_rows(&self, list: ElementId) -> usize {
        self.rows_in(list)
            .into_iter()
            .map(|row| {
                1 + self
                    .child_list_of(row)
                    .filter(|l| !self.is_hidden(*l))
                    .map_or(0, |l| self.count_rows(l))
            })
            .sum()
    }

    fn settle(&mut self, effect: &PendingEffect) {
        if let Some(list) = self.get_mut(effect.list) {
            list.reveal = None;
            list.hidden = effect.slide == Slide::Close;
        }
    }

    fn start_effect(&mut self, list: ElementId, slide: Slide) -> EffectStatus {
        self.next_effect += 1;
        let id = EffectId(self.next_effect);
        let shown = match slide {
            Slide::Open => 0,
            Slide::Close => self.count_rows(list),
        };
        if let Some(element) = self.get_mut(list) {
            element.hidden = false;
            element.reveal = Some(shown);
        }
        self.pending.push(PendingEffect {
            id,
            list,
            slide,
            shown,
        });
        EffectStatus::Pending(id)
    }

    /// Drop a running slide on `list`, leaving visibility to the caller.
    fn cancel_effect(&mut self, list: ElementId) {
        self.pending.retain(|e| e.list != list);
        if let Some(element) = self.get_mut(list) {
            element.reveal = None;
        }
    }

    fn position_of(&self, element: ElementId) -> Option<usize> {
        self.visible_rows().iter().position(|r| r.element == element)
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        if let Some(parent) = element.parent
            && let Some(p) = self.get_mut(parent)
        {
            p.children.push(id);
        }
        self.elements.push(element);
        id
    }
}

impl Host for Document {
    type Handle = ElementId;

    fn attach_root(&mut self, anchor: &str) -> Result<ElementId> {
        let container = self
            .element_by_id(anchor)
            .ok_or_else(|| NavTreeError::anchor_not_found(anchor))?;
        let list = self.push(Element::new(ElementKind::List, Some(container)));
        self.root_lists.push(list);
        Ok(list)
    }

    fn create_child_list(&mut self, row: &ElementId) -> ElementId {
        let mut list = Element::new(ElementKind::List, Some(*row));
        list.hidden = true;
        self.push(list)
    }

    fn create_row(&mut self, list: &ElementId, label: &str) -> ElementId {
        let mut row = Element::new(ElementKind::Row, Some(*list));
        row.label = label.to_string();
        self.push(row)
    }

    fn set_link(&mut self, row: &ElementId, href: &str) {
        if let Some(element) = self.get_mut(*row) {
            element.href = Some(href.to_string());
        }
    }

    fn create_icon(&mut self, row: &ElementId, glyph: Glyph) -> ElementId {
        let mut icon = Element::new(ElementKind::Icon, Some(*row));
        icon.glyph = Some(glyph);
        self.push(icon)
    }

    fn set_icon(&mut self, icon: &ElementId, glyph: Glyph) {
        if let Some(element) = self.get_mut(*icon) {
            element.glyph = Some(glyph);
        }
    }

    fn on_click(&mut self, element: &ElementId, action: ClickAction) {
        if let Some(element) = self.get_mut(*element) {
            element.click = Some(action);
        }
    }

    fn show(&mut self, element: &ElementId, reveal: Reveal) -> EffectStatus {
        self.cancel_effect(*element);
        if self.animate && reveal == Reveal::Slide && self.is_hidden(*element) {
            return self.start_effect(*element, Slide::Open);
        }
        if let Some(e) = self.get_mut(*element) {
            e.hidden = false;
        }
        EffectStatus::Done
    }

    fn hide(&mut self, element: &ElementId, reveal: Reveal) -> EffectStatus {
        self.cancel_effect(*element);
        if self.animate && reveal == Reveal::Slide && !self.is_hidden(*element) {
            return self.start_effect(*element, Slide::Close);
        }
        if let Some(e) = self.get_mut(*element) {
            e.hidden = true;
        }
        EffectStatus::Done
    }

    fn mark_selected(&mut self, row: &ElementId, id: &str) {
        if let Some(element) = self.get_mut(*row) {
            element.selected = true;
            self.ids.insert(id.to_string(), *row);
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, element: &ElementId, offset: i64) {
        let Some(position) = self.position_of(*element) else {
            tracing::debug!("scroll target {:?} is not visible", element);
            return;
        };
        let top = i64::try_from(position).unwrap_or(i64::MAX).saturating_add(offset);
        self.scroll_top = usize::try_from(top.max(0)).unwrap_or(0);
        self.scroll_generation += 1;
    }

    fn poll_finished(&mut self) -> Vec<EffectId> {
        std::mem::take(&mut self.finished)
    }
}
