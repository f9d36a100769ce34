//! Configuration validation for navtree.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, FindConfig, OutputConfig, TreeConfig, TuiConfig, ViewConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.tree.validate());
        errors.extend(self.output.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl Validatable for TreeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.index_page.is_empty() {
            errors.push(ConfigError::new("tree.index_page", "Index page must not be empty"));
        }
        if self.anchor.trim().is_empty() {
            errors.push(ConfigError::new("tree.anchor", "Anchor id must not be empty"));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref file_path) = self.file
            && let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError::new(
                "output.file",
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let valid_themes = ["dark", "light"];
        if !valid_themes.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    valid_themes.join(", ")
                ),
            ));
        }
        if self.tick_rate_ms == 0 {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                "Tick rate must be at least 1 ms",
            ));
        }
        if self.slide_rows_per_tick == 0 {
            errors.push(ConfigError::new(
                "tui.slide_rows_per_tick",
                "Slides must reveal at least one row per tick",
            ));
        }

        errors
    }
}

impl Validatable for ViewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.table_path.exists() {
            errors.push(ConfigError::new(
                "table_path",
                format!("File not found: {}", self.table_path.display()),
            ));
        }
        if let Some(ref dir) = self.resolve_dir
            && !dir.is_dir()
        {
            errors.push(ConfigError::new(
                "resolve_dir",
                format!("Not a directory: {}", dir.display()),
            ));
        }
        errors.extend(self.tree.validate());
        errors.extend(self.output.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl Validatable for FindConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.table_path.exists() {
            errors.push(ConfigError::new(
                "table_path",
                format!("File not found: {}", self.table_path.display()),
            ));
        }
        if self.page.is_empty() {
            errors.push(ConfigError::new("page", "Page must not be empty"));
        }
        errors.extend(self.tree.validate());
        errors
    }
}
