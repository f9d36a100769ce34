//! Where rendered trees go and in which form.

use anyhow::{Context, Result};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// How a tree is presented.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Interactive view on a terminal, text otherwise
    #[default]
    Auto,
    /// Interactive terminal view
    Tui,
    /// Indented text, one row per line
    Text,
    /// Visible rows and breadcrumb as JSON
    Json,
}

impl OutputFormat {
    /// Settle `Auto` for a target: the browser on a terminal, text elsewhere.
    pub fn resolve(self, target: &OutputTarget) -> Self {
        match self {
            Self::Auto if target.is_terminal() => Self::Tui,
            Self::Auto => Self::Text,
            other => other,
        }
    }
}

/// Stdout or a file given with `--output-file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl OutputTarget {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }

    /// Write a rendered tree or report.
    pub fn write(&self, content: &str, quiet: bool) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(content.as_bytes())
                    .and_then(|()| out.flush())
                    .context("failed to write to stdout")
            }
            Self::File(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                if !quiet {
                    tracing::info!("wrote {}", path.display());
                }
                Ok(())
            }
        }
    }
}

/// Colors stay on unless `--no-color` is given or `NO_COLOR` is set and non-empty.
pub fn color_enabled(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
}
