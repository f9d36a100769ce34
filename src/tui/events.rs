//! Terminal events and their mapping onto [`ViewApp`] actions.

use super::app::ViewApp;
use super::theme;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Duration;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal tick (drives slide animations)
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TICK_RATE_MS)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut ViewApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    app.clear_status_message();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.navigate_up(),
        KeyCode::Down | KeyCode::Char('j') => app.navigate_down(),
        KeyCode::Home | KeyCode::Char('g') => app.go_first(),
        KeyCode::End | KeyCode::Char('G') => app.go_last(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Right | KeyCode::Char('l') => app.expand(),
        KeyCode::Left | KeyCode::Char('h') => app.collapse(),
        KeyCode::Enter => app.activate(),
        KeyCode::Char(' ') => app.toggle(),
        KeyCode::Backspace | KeyCode::Char('b') => {
            app.go_back();
        }
        KeyCode::Char('s') => app.jump_to_selected(),
        KeyCode::Char('t') => {
            let name = theme::toggle_theme();
            app.set_status_message(format!("Theme: {name}"));
        }
        _ => {}
    }
}

/// Handle mouse events over the tree panel at `tree_area`.
///
/// A click on a row's glyphs toggles it; a click on its label follows the
/// link. The wheel moves the cursor.
pub fn handle_mouse_event(app: &mut ViewApp, mouse: MouseEvent, tree_area: Rect) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.navigate_up(),
        MouseEventKind::ScrollDown => app.navigate_down(),
        MouseEventKind::Down(MouseButton::Left) => {
            if !tree_area.contains((mouse.column, mouse.row).into()) {
                return;
            }
            let index = app.view.offset + usize::from(mouse.row - tree_area.y);
            let rows = app.rows();
            let Some(row) = rows.get(index) else {
                return;
            };
            app.view.cursor = index;
            if mouse.column < glyph_end(tree_area.x, row.glyphs.len()) && row.toggle.is_some() {
                app.toggle();
            } else {
                app.activate();
            }
        }
        _ => {}
    }
}

/// First column past a row's connector glyphs.
///
/// Highlight symbol, then three columns per glyph.
fn glyph_end(x: u16, glyphs: usize) -> u16 {
    let width = u16::try_from(glyphs).unwrap_or(u16::MAX).saturating_mul(3);
    x.saturating_add(2).saturating_add(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TreeConfig, TuiConfig};
    use crate::model::{NavEntry, NavTable};

    fn app() -> ViewApp {
        let table = NavTable::from(vec![
            NavEntry::leaf("Main Page", Some("index.html")),
            NavEntry::group(
                "Modules",
                Some("modules.html"),
                vec![NavEntry::leaf("Graph", Some("graph.html"))],
            ),
        ]);
        ViewApp::new(table, TreeConfig::default(), "index.html", &TuiConfig::default())
            .expect("app opens")
    }

    fn press(app: &mut ViewApp, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut ViewApp, column: u16, row: u16) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(app, mouse, Rect::new(1, 2, 40, 10));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_arrow_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.view.cursor, 1);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.view.cursor, 1);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.view.cursor, 0);
    }

    #[test]
    fn test_enter_follows_link() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.page(), "modules.html");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.page(), "index.html");
    }

    #[test]
    fn test_click_on_glyph_toggles() {
        let mut app = app();
        // Row 1 is "Modules": highlight at 1..3, connector at 3..6.
        click(&mut app, 4, 3);
        for _ in 0..10 {
            app.tick();
        }
        assert_eq!(app.page(), "index.html");
        assert_eq!(app.rows().len(), 3);
    }

    #[test]
    fn test_glyph_end_saturates() {
        assert_eq!(glyph_end(1, 1), 6);
        assert_eq!(glyph_end(10, 30_000), u16::MAX);
        assert_eq!(glyph_end(u16::MAX - 1, 0), u16::MAX);
        assert_eq!(glyph_end(0, usize::MAX), u16::MAX);
    }

    #[test]
    fn test_click_on_label_follows_link() {
        let mut app = app();
        click(&mut app, 8, 3);
        assert_eq!(app.page(), "modules.html");
    }

    #[test]
    fn test_click_outside_tree_is_ignored() {
        let mut app = app();
        click(&mut app, 0, 0);
        assert_eq!(app.view.cursor, 0);
        assert_eq!(app.page(), "index.html");
    }
}
