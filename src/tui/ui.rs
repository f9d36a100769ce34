//! Terminal setup, main loop and frame rendering for the tree browser.

use super::app::ViewApp;
use super::events::{Event, EventHandler, handle_key_event, handle_mouse_event};
use super::theme::{Styles, Theme, colors, set_theme};
use super::widgets::NavTreeView;
use crate::config::TuiConfig;
use crate::host::GlyphStyle;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, stdout};

/// Run the tree browser until the user quits.
pub fn run_view_tui(
    app: &mut ViewApp,
    config: &TuiConfig,
    glyphs: GlyphStyle,
    use_color: bool,
) -> io::Result<()> {
    set_theme(if use_color {
        Theme::from_name(&config.theme)
    } else {
        Theme::monochrome()
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    if config.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, config, glyphs);

    // Restore terminal
    disable_raw_mode()?;
    if config.mouse_enabled {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut ViewApp,
    config: &TuiConfig,
    glyphs: GlyphStyle,
) -> io::Result<()> {
    let events = EventHandler::new(config.tick_rate_ms);
    app.resize(terminal.size()?.height);
    let mut tree_area = Rect::default();

    loop {
        terminal.draw(|frame| tree_area = render(frame, app, config, glyphs))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse, tree_area),
            Event::Resize(_, height) => app.resize(height),
            Event::Tick => app.tick(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Draw one frame, returning the area the tree rows occupy.
fn render(frame: &mut Frame, app: &mut ViewApp, config: &TuiConfig, glyphs: GlyphStyle) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(config.header_height),
            Constraint::Min(3),
            Constraint::Length(config.footer_height),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_focused())
        .title(Span::styled(" Contents ", Styles::header_title()));
    let tree_area = block.inner(chunks[1]);
    let rows = app.rows();
    frame.render_stateful_widget(
        NavTreeView::new(&rows).glyphs(glyphs).block(block),
        chunks[1],
        &mut app.view,
    );

    render_footer(frame, chunks[2], app);
    tree_area
}

fn render_header(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let crumbs = app.breadcrumb_labels();
    let mut spans = vec![
        Span::styled("navtree", Styles::header_title()),
        Span::styled(" │ ", Style::default().fg(colors().muted)),
        Span::styled(app.page().to_string(), Style::default().fg(colors().text).bold()),
    ];
    if !crumbs.is_empty() {
        spans.push(Span::styled(" │ ", Style::default().fg(colors().muted)));
        spans.push(Span::styled(crumbs.join(" › "), Styles::text_muted()));
    }
    if app.is_animating() {
        spans.push(Span::styled(" ⋯", Style::default().fg(colors().accent)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ViewApp) {
    if let Some(ref msg) = app.status_message {
        let status_line = Line::from(vec![
            Span::styled("ℹ ", Style::default().fg(colors().accent)),
            Span::styled(msg.as_str(), Styles::warning().bold()),
        ]);
        frame.render_widget(Paragraph::new(status_line).style(Styles::status_bar()), area);
        return;
    }

    let hints = [
        ("↑↓", "move"),
        ("←→", "collapse/expand"),
        ("Enter", "open"),
        ("Space", "toggle"),
        ("s", "current"),
        ("b", "back"),
        ("t", "theme"),
        ("q", "quit"),
    ];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!(" {key}"), Styles::shortcut_key()),
                Span::styled(format!(" {desc} "), Styles::shortcut_desc()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Styles::status_bar()), area);
}
