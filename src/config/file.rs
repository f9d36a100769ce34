//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::pipeline::OutputFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".navtree.yaml",
    ".navtree.yml",
    "navtree.yaml",
    "navtree.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/navtree/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(config_dir) = user_config_dir()
        && let Some(path) = find_config_in_dir(&config_dir)
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Per-user configuration directory (`~/.config/navtree` on Linux).
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("navtree"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a CLI config
    /// built from defaults leaves file settings alone.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.tree.index_page != defaults.tree.index_page {
            self.tree.index_page.clone_from(&other.tree.index_page);
        }
        if other.tree.relpath != defaults.tree.relpath {
            self.tree.relpath.clone_from(&other.tree.relpath);
        }
        if other.tree.anchor != defaults.tree.anchor {
            self.tree.anchor.clone_from(&other.tree.anchor);
        }
        if other.tree.glyphs != defaults.tree.glyphs {
            self.tree.glyphs = other.tree.glyphs;
        }

        if other.output.format != OutputFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.tui.theme != defaults.tui.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
        if other.tui.tick_rate_ms != defaults.tui.tick_rate_ms {
            self.tui.tick_rate_ms = other.tui.tick_rate_ms;
        }
        if other.tui.slide_rows_per_tick != defaults.tui.slide_rows_per_tick {
            self.tui.slide_rows_per_tick = other.tui.slide_rows_per_tick;
        }
        if other.tui.header_height != defaults.tui.header_height {
            self.tui.header_height = other.tui.header_height;
        }
        if other.tui.footer_height != defaults.tui.footer_height {
            self.tui.footer_height = other.tui.footer_height;
        }
        if !other.tui.mouse_enabled {
            self.tui.mouse_enabled = false;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content for `config`.
#[must_use]
pub fn generate_example_config(config: &AppConfig) -> String {
    format!(
        r"# navtree configuration
# Place this file at .navtree.yaml in your project root or ~/.config/navtree/
# CLI arguments always override file settings.

{}",
        serde_yaml::to_string(config).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GlyphStyle;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join(".navtree.yaml");
        std::fs::write(&config_path, "tree:\n  glyphs: ascii\n").expect("write");

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
tree:
  relpath: ../
  glyphs: ascii
output:
  format: json
tui:
  theme: light
  slide_rows_per_tick: 4
";
        std::fs::write(&config_path, yaml).expect("write");

        let config = load_config_file(&config_path).expect("valid config");
        assert_eq!(config.tree.relpath, "../");
        assert_eq!(config.tree.glyphs, GlyphStyle::Ascii);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.tui.theme, "light");
        assert_eq!(config.tui.slide_rows_per_tick, 4);
        assert_eq!(config.tree.index_page, "index.html");
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_rejects_bad_yaml() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "tree: [unterminated").expect("write");
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().relpath("../").theme("light").build();
        let cli = AppConfig::builder()
            .glyphs(GlyphStyle::Ascii)
            .output_format(OutputFormat::Text)
            .build();

        base.merge(&cli);

        assert_eq!(base.tree.relpath, "../");
        assert_eq!(base.tui.theme, "light");
        assert_eq!(base.tree.glyphs, GlyphStyle::Ascii);
        assert_eq!(base.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_generate_example_config_round_trips() {
        let example = generate_example_config(&AppConfig::default());
        assert!(example.contains("tree:"));
        let parsed: AppConfig = serde_yaml::from_str(&example).expect("valid yaml");
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "tui:\n  theme: light\n").expect("write");

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
