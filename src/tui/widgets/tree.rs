//! Navigation tree widget drawing the rows a [`Document`] shows.
//!
//! [`Document`]: crate::host::Document

use crate::host::{GlyphStyle, VisibleRow};
use crate::tui::theme::colors;
use ratatui::{
    prelude::*,
    widgets::{Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cursor and scroll position of the tree view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeViewState {
    /// Row under the cursor
    pub cursor: usize,
    /// First row drawn
    pub offset: usize,
    /// Rows on screen at the last render
    pub visible_count: usize,
    /// Height of the last render area
    pub height: usize,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn select_next(&mut self) {
        if self.visible_count > 0 && self.cursor < self.visible_count - 1 {
            self.cursor += 1;
        }
    }

    pub const fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub const fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub const fn select_last(&mut self) {
        if self.visible_count > 0 {
            self.cursor = self.visible_count - 1;
        }
    }

    pub const fn page_down(&mut self) {
        let step = if self.height > 1 { self.height - 1 } else { 1 };
        self.cursor = self.cursor.saturating_add(step);
        self.clamp();
    }

    pub const fn page_up(&mut self) {
        let step = if self.height > 1 { self.height - 1 } else { 1 };
        self.cursor = self.cursor.saturating_sub(step);
    }

    /// Put the cursor on `row` with `top` as the first drawn row.
    pub const fn jump(&mut self, row: usize, top: usize) {
        self.cursor = row;
        self.offset = top;
    }

    /// Keep the cursor inside the current row count.
    pub const fn clamp(&mut self) {
        if self.visible_count == 0 {
            self.cursor = 0;
        } else if self.cursor >= self.visible_count {
            self.cursor = self.visible_count - 1;
        }
    }

    /// Adjust the offset so the cursor is on screen.
    const fn follow_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        } else if self.cursor < self.offset {
            self.offset = self.cursor;
        }
        if self.visible_count <= height {
            self.offset = 0;
        } else if self.offset > self.visible_count - height {
            self.offset = self.visible_count - height;
        }
    }
}

/// The navigation tree widget.
pub struct NavTreeView<'a> {
    rows: &'a [VisibleRow],
    glyphs: GlyphStyle,
    block: Option<Block<'a>>,
    highlight_style: Style,
    highlight_symbol: &'a str,
}

impl<'a> NavTreeView<'a> {
    pub fn new(rows: &'a [VisibleRow]) -> Self {
        let scheme = colors();
        Self {
            rows,
            glyphs: GlyphStyle::default(),
            block: None,
            highlight_style: Style::default()
                .bg(scheme.selection)
                .add_modifier(Modifier::BOLD),
            highlight_symbol: "▶ ",
        }
    }

    pub const fn glyphs(mut self, glyphs: GlyphStyle) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub const fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    fn label_style(row: &VisibleRow) -> Style {
        let scheme = colors();
        if row.selected {
            Style::default()
                .fg(scheme.current_page)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if row.href.is_some() {
            Style::default().fg(scheme.link)
        } else if row.is_expandable() {
            Style::default().fg(scheme.group).bold()
        } else {
            Style::default().fg(scheme.text)
        }
    }
}

/// Shorten `label` to `max` columns, ending in an ellipsis when cut.
fn truncate_label(label: &str, max: usize) -> Cow<'_, str> {
    if label.width() <= max {
        return Cow::Borrowed(label);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    Cow::Owned(out)
}

/// Write `text` from `x` without passing `right`, returning the next column.
fn put(buf: &mut Buffer, x: u16, y: u16, right: u16, text: &str, style: Style) -> u16 {
    if x >= right {
        return x;
    }
    let (next, _) = buf.set_stringn(x, y, text, usize::from(right - x), style);
    next
}

impl StatefulWidget for NavTreeView<'_> {
    type State = TreeViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = self.block.as_ref().map_or(area, |b| {
            let inner = b.inner(area);
            b.clone().render(area, buf);
            inner
        });

        if inner_area.width < 4 || inner_area.height < 1 {
            return;
        }

        let area = inner_area;
        let height = area.height as usize;
        state.visible_count = self.rows.len();
        state.height = height;
        state.clamp();
        state.follow_cursor(height);

        let scheme = colors();
        let right = area.x + area.width;
        let symbol_width = self.highlight_symbol.chars().count() as u16;

        for (i, row) in self.rows.iter().skip(state.offset).take(height).enumerate() {
            let y = area.y + i as u16;
            let is_cursor = state.offset + i == state.cursor;

            let mut x = area.x;
            if is_cursor {
                x = put(
                    buf,
                    x,
                    y,
                    right,
                    self.highlight_symbol,
                    Style::default().fg(scheme.accent),
                );
            } else {
                x += symbol_width;
            }

            if let Some((connector, indent)) = row.glyphs.split_last() {
                for glyph in indent {
                    x = put(
                        buf,
                        x,
                        y,
                        right,
                        self.glyphs.symbol(*glyph),
                        Style::default().fg(scheme.muted),
                    );
                }
                let connector_style = if connector.is_toggle() {
                    Style::default().fg(scheme.accent)
                } else {
                    Style::default().fg(scheme.muted)
                };
                x = put(buf, x, y, right, self.glyphs.symbol(*connector), connector_style);
            }

            let label_style = if is_cursor {
                Self::label_style(row).patch(self.highlight_style)
            } else {
                Self::label_style(row)
            };
            let label = truncate_label(&row.label, usize::from(right.saturating_sub(x)));
            x = put(buf, x, y, right, &label, label_style);

            if is_cursor {
                while x < right {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_style(self.highlight_style);
                    }
                    x += 1;
                }
            }
        }

        if self.rows.len() > height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Style::default().fg(scheme.accent))
                .track_style(Style::default().fg(scheme.muted));
            let mut scrollbar_state = ScrollbarState::new(self.rows.len()).position(state.offset);
            scrollbar.render(area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Document, Glyph};
    use crate::model::{NavEntry, NavTable};
    use crate::tree::{NavTree, TreeOptions};

    fn rows() -> Vec<VisibleRow> {
        let table = NavTable::from(vec![
            NavEntry::leaf("Main Page", Some("index.html")),
            NavEntry::group(
                "Modules",
                None,
                vec![NavEntry::leaf("Graph", Some("graph.html"))],
            ),
        ]);
        let mut document = Document::new();
        let _tree = NavTree::init(table, TreeOptions::new("graph.html"), &mut document)
            .expect("tree builds");
        document.visible_rows()
    }

    #[test]
    fn test_tree_view_state_navigation() {
        let mut state = TreeViewState {
            visible_count: 3,
            ..TreeViewState::new()
        };
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.cursor, 2);
        state.select_first();
        state.select_prev();
        assert_eq!(state.cursor, 0);
        state.select_last();
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_follow_cursor_scrolls() {
        let mut state = TreeViewState {
            visible_count: 10,
            cursor: 7,
            ..TreeViewState::new()
        };
        state.follow_cursor(4);
        assert_eq!(state.offset, 4);
        state.cursor = 1;
        state.follow_cursor(4);
        assert_eq!(state.offset, 1);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Modules", 10), "Modules");
        assert_eq!(truncate_label("Modules", 4), "Mod…");
        assert_eq!(truncate_label("日本語", 4), "日…");
        assert_eq!(truncate_label("Modules", 0), "");
    }

    #[test]
    fn test_render_draws_glyphs_and_labels() {
        let rows = rows();
        assert_eq!(rows[2].glyphs, vec![Glyph::Blank, Glyph::LastNode]);

        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TreeViewState::new();
        NavTreeView::new(&rows)
            .glyphs(GlyphStyle::Ascii)
            .render(area, &mut buf, &mut state);

        let line = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        };
        assert_eq!(line(0), "▶ |- Main Page");
        assert_eq!(line(1), "  `v Modules");
        assert_eq!(line(2), "     `- Graph");
        assert_eq!(state.visible_count, 3);
    }
}
