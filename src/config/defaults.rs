//! Default configuration values and presets for navtree.

use super::types::{AppConfig, OutputConfig, TreeConfig, TuiConfig};
use crate::host::GlyphStyle;
use crate::pipeline::OutputFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Box-drawing glyphs, interactive view on terminals
    Default,
    /// ASCII glyphs and no color, for logs and dumb terminals
    Plain,
    /// JSON output without color
    Ci,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Plain => "plain",
            Self::Ci => "ci",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "plain" | "ascii" => Some(Self::Plain),
            "ci" | "json" => Some(Self::Ci),
            _ => None,
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Plain, Self::Ci]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Configuration for a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Plain => Self {
                tree: TreeConfig {
                    glyphs: GlyphStyle::Ascii,
                    ..TreeConfig::default()
                },
                output: OutputConfig {
                    format: OutputFormat::Text,
                    file: None,
                    no_color: true,
                },
                tui: TuiConfig::default(),
            },
            ConfigPreset::Ci => Self {
                tree: TreeConfig::default(),
                output: OutputConfig {
                    format: OutputFormat::Json,
                    file: None,
                    no_color: true,
                },
                tui: TuiConfig::default(),
            },
        }
    }
}

// ============================================================================
// Default Values
// ============================================================================

/// Milliseconds between TUI animation ticks.
pub const DEFAULT_TICK_RATE_MS: u64 = 40;

/// Rows a sliding list uncovers per tick.
pub const DEFAULT_SLIDE_ROWS_PER_TICK: usize = 2;

/// Header rows above the tree panel.
pub const DEFAULT_HEADER_HEIGHT: u16 = 1;

/// Footer rows below the tree panel.
pub const DEFAULT_FOOTER_HEIGHT: u16 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("ASCII"), Some(ConfigPreset::Plain));
        assert_eq!(ConfigPreset::from_name("fancy"), None);
    }

    #[test]
    fn test_plain_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Plain);
        assert_eq!(config.tree.glyphs, GlyphStyle::Ascii);
        assert!(config.output.no_color);
        assert_eq!(config.output.format, OutputFormat::Text);
    }
}
