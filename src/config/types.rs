//! Configuration types for navtree operations.
//!
//! Provides structured configuration for the view and find operations.

use super::defaults::{
    DEFAULT_FOOTER_HEIGHT, DEFAULT_HEADER_HEIGHT, DEFAULT_SLIDE_ROWS_PER_TICK,
    DEFAULT_TICK_RATE_MS,
};
use crate::host::{DEFAULT_ANCHOR, GlyphStyle};
use crate::pipeline::OutputFormat;
use crate::tree::{DEFAULT_INDEX_PAGE, TreeOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Tree construction settings
    pub tree: TreeConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the fallback page.
    pub fn index_page(mut self, page: impl Into<String>) -> Self {
        self.config.tree.index_page = page.into();
        self
    }

    /// Set the relative path prefix for links and icons.
    pub fn relpath(mut self, relpath: impl Into<String>) -> Self {
        self.config.tree.relpath = relpath.into();
        self
    }

    /// Set the glyph style for text rendering.
    pub const fn glyphs(mut self, glyphs: GlyphStyle) -> Self {
        self.config.tree.glyphs = glyphs;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Set the TUI theme.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.tui.theme = theme.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// How trees are built for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TreeConfig {
    /// Page selected when the requested page is not in the table
    pub index_page: String,
    /// Prefix prepended to every link and icon image
    pub relpath: String,
    /// Id of the container the tree attaches to
    pub anchor: String,
    /// Glyph characters for text rendering
    pub glyphs: GlyphStyle,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            index_page: DEFAULT_INDEX_PAGE.to_string(),
            relpath: String::new(),
            anchor: DEFAULT_ANCHOR.to_string(),
            glyphs: GlyphStyle::default(),
        }
    }
}

impl TreeConfig {
    /// Tree options for `page` under these settings.
    pub fn options_for(&self, page: impl Into<String>) -> TreeOptions {
        TreeOptions::new(page)
            .relpath(self.relpath.clone())
            .index_page(self.index_page.clone())
            .anchor(self.anchor.clone())
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,
    /// Milliseconds between animation ticks
    #[schemars(range(min = 1))]
    pub tick_rate_ms: u64,
    /// Rows a sliding list reveals or hides per tick
    #[schemars(range(min = 1))]
    pub slide_rows_per_tick: usize,
    /// Rows taken by the header above the tree
    pub header_height: u16,
    /// Rows taken by the footer below the tree
    pub footer_height: u16,
    /// Enable mouse support
    pub mouse_enabled: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            slide_rows_per_tick: DEFAULT_SLIDE_ROWS_PER_TICK,
            header_height: DEFAULT_HEADER_HEIGHT,
            footer_height: DEFAULT_FOOTER_HEIGHT,
            mouse_enabled: true,
        }
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for view operations
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Path to the navigation table
    pub table_path: PathBuf,
    /// Page to select
    pub page: String,
    /// Directory searched for split tables (defaults to the table's directory)
    pub resolve_dir: Option<PathBuf>,
    /// Tree settings
    pub tree: TreeConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// TUI configuration
    pub tui: TuiConfig,
    /// Suppress non-essential output
    pub quiet: bool,
}

/// Configuration for find operations
#[derive(Debug, Clone)]
pub struct FindConfig {
    /// Path to the navigation table
    pub table_path: PathBuf,
    /// Page to look up
    pub page: String,
    /// Do not fall back to the index page
    pub no_fallback: bool,
    /// Directory searched for split tables (defaults to the table's directory)
    pub resolve_dir: Option<PathBuf>,
    /// Tree settings
    pub tree: TreeConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Suppress non-essential output
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .relpath("../")
            .glyphs(GlyphStyle::Ascii)
            .output_format(OutputFormat::Json)
            .no_color(true)
            .build();
        assert_eq!(config.tree.relpath, "../");
        assert_eq!(config.tree.glyphs, GlyphStyle::Ascii);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.no_color);
        assert_eq!(config.tree.index_page, "index.html");
    }

    #[test]
    fn test_options_for_page() {
        let tree = TreeConfig {
            relpath: "../".to_string(),
            ..TreeConfig::default()
        };
        let options = tree.options_for("modules.html");
        assert_eq!(options.page, "modules.html");
        assert_eq!(options.relpath, "../");
        assert_eq!(options.index_page, "index.html");
        assert_eq!(options.anchor, DEFAULT_ANCHOR);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("tree:\n  glyphs: ascii\n").expect("valid yaml");
        assert_eq!(config.tree.glyphs, GlyphStyle::Ascii);
        assert_eq!(config.tui, TuiConfig::default());
    }
}
