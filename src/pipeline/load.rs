//! Table loading stage.

use crate::model::NavTable;
use crate::parsers::TableLoader;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A loaded navigation table with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: NavTable,
    pub path: PathBuf,
    /// Extra files read to resolve split tables
    pub files_read: usize,
}

impl LoadedTable {
    /// Number of entries at every level.
    pub fn entry_count(&self) -> usize {
        self.table.total_len()
    }
}

/// Load a table, resolving split-table references in `resolve_dir` (or
/// the table's own directory).
pub fn load_table_with_context(
    path: &Path,
    resolve_dir: Option<&Path>,
    quiet: bool,
) -> Result<LoadedTable> {
    if !quiet {
        tracing::info!("Loading navigation table: {}", path.display());
    }
    let dir = resolve_dir
        .map(Path::to_path_buf)
        .or_else(|| path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut loader = TableLoader::new(dir);
    let table = loader
        .load_file(path)
        .with_context(|| format!("Failed to load navigation table {}", path.display()))?;

    let loaded = LoadedTable {
        table,
        path: path.to_path_buf(),
        files_read: loader.files_read(),
    };
    if !quiet {
        tracing::info!(
            "Loaded {} entries ({} top-level, {} extra files)",
            loaded.entry_count(),
            loaded.table.len(),
            loaded.files_read
        );
    }
    Ok(loaded)
}
