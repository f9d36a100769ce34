//! Centralized theme and color scheme for the TUI.

use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Color scheme for the TUI application.
/// Provides semantic colors for different UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    // UI element colors
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Tree colors
    pub link: Color,
    pub group: Color,
    pub current_page: Color,

    // Status colors
    pub warning: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Const dark theme for static initialization
    const fn dark_const() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(30, 30, 40),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(60, 60, 80),

            link: Color::LightBlue,
            group: Color::Cyan,
            current_page: Color::Yellow,

            warning: Color::Yellow,
        }
    }

    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self::dark_const()
    }

    /// Light theme
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(0, 100, 150),
            accent: Color::Rgb(180, 140, 0),
            muted: Color::Rgb(150, 150, 150),
            border_focused: Color::Rgb(0, 100, 150),
            background_alt: Color::Rgb(240, 240, 245),
            text: Color::Rgb(30, 30, 30),
            text_muted: Color::Rgb(100, 100, 100),
            selection: Color::Rgb(200, 220, 240),

            link: Color::Rgb(0, 0, 180),
            group: Color::Rgb(0, 100, 150),
            current_page: Color::Rgb(160, 60, 0),

            warning: Color::Rgb(180, 140, 0),
        }
    }

    /// No colors at all; emphasis comes from modifiers only
    pub const fn monochrome() -> Self {
        Self {
            primary: Color::Reset,
            accent: Color::Reset,
            muted: Color::Reset,
            border_focused: Color::Reset,
            background_alt: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            selection: Color::Reset,

            link: Color::Reset,
            group: Color::Reset,
            current_page: Color::Reset,

            warning: Color::Reset,
        }
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark_const());

/// Theme configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Const dark theme for static initialization
    const fn dark_const() -> Self {
        Self {
            colors: ColorScheme::dark_const(),
            name: "dark",
        }
    }

    pub const fn dark() -> Self {
        Self::dark_const()
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub const fn monochrome() -> Self {
        Self {
            colors: ColorScheme::monochrome(),
            name: "monochrome",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "monochrome" | "none" => Self::monochrome(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }
}

/// Get the current theme name
pub fn current_theme_name() -> &'static str {
    THEME.read().unwrap_or_else(PoisonError::into_inner).name
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Toggle between dark and light
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets for consistent UI elements
pub struct Styles;

impl Styles {
    /// Header title style
    pub fn header_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    /// Muted/secondary text style
    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Border style (focused)
    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    /// Status bar background style
    pub fn status_bar() -> Style {
        Style::default().bg(colors().background_alt)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent)
    }

    /// Shortcut description style
    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Warning style
    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("LIGHT").name, "light");
        assert_eq!(Theme::from_name("none").name, "monochrome");
        assert_eq!(Theme::from_name("anything").name, "dark");
    }

    #[test]
    fn test_theme_rotation() {
        assert_eq!(Theme::dark().next().name, "light");
        assert_eq!(Theme::light().next().name, "dark");
        assert_eq!(Theme::monochrome().next().name, "dark");
    }

    #[test]
    fn test_monochrome_has_no_colors() {
        let reset = Color::Reset;
        assert_eq!(
            ColorScheme::monochrome(),
            ColorScheme {
                primary: reset,
                accent: reset,
                muted: reset,
                border_focused: reset,
                background_alt: reset,
                text: reset,
                text_muted: reset,
                selection: reset,
                link: reset,
                group: reset,
                current_page: reset,
                warning: reset,
            }
        );
    }
}
