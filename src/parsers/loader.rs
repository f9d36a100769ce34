//! Resolution of split tables.
//!
//! Large documentation sets split their navigation over several scripts:
//! an entry's children may name another table, `var NAME = [...]`, which
//! lives either earlier in the same input or in `NAME.js` (or
//! `NAME.json`) next to it.

use super::table::{RawChildren, RawEntry, parse_table_str};
use crate::error::{ErrorContext, NavTreeError, ParseErrorKind, Result};
use crate::model::{NavEntry, NavTable};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extensions tried, in order, when looking for a referenced table.
const TABLE_EXTENSIONS: &[&str] = &["js", "json"];

/// Largest table file read from disk.
const MAX_TABLE_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Loads navigation tables and resolves references between them.
#[derive(Debug)]
pub struct TableLoader {
    dir: PathBuf,
    raw: HashMap<String, Vec<RawEntry>>,
    resolved: HashMap<String, NavTable>,
    files_read: usize,
}

impl TableLoader {
    /// A loader that looks up referenced tables in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            raw: HashMap::new(),
            resolved: HashMap::new(),
            files_read: 0,
        }
    }

    /// Number of files read so far.
    pub const fn files_read(&self) -> usize {
        self.files_read
    }

    /// Load the primary table of `path`, resolving references next to it.
    pub fn load_path(path: &Path) -> Result<NavTable> {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self::new(dir).load_file(path)
    }

    /// Load the primary table of `path`, resolving references in this
    /// loader's directory.
    pub fn load_file(&mut self, path: &Path) -> Result<NavTable> {
        let content = read_table_file(path)?;
        self.load_str(&content, &path.display().to_string())
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Load the primary table of in-memory `content`.
    pub fn load_str(&mut self, content: &str, origin: &str) -> Result<NavTable> {
        let bundle = parse_table_str(content, origin)?;
        let primary = bundle
            .primary()
            .map(|(name, entries)| (name.to_string(), entries.to_vec()));
        for (name, entries) in bundle.into_tables() {
            self.raw.entry(name).or_insert(entries);
        }
        let Some((name, entries)) = primary else {
            return Err(NavTreeError::no_table(origin));
        };

        let mut stack = Vec::new();
        if !name.is_empty() {
            stack.push(name.clone());
        }
        let table = self.resolve_entries(&entries, &mut stack)?;
        if !name.is_empty() {
            self.resolved.insert(name, table.clone());
        }
        Ok(table)
    }

    /// Resolve a table by name, reading its file if needed.
    pub fn table(&mut self, name: &str) -> Result<NavTable> {
        self.resolve_named(name, &mut Vec::new())
    }

    fn resolve_named(&mut self, name: &str, stack: &mut Vec<String>) -> Result<NavTable> {
        if let Some(table) = self.resolved.get(name) {
            return Ok(table.clone());
        }
        if stack.iter().any(|n| n == name) {
            let mut chain = stack.clone();
            chain.push(name.to_string());
            return Err(NavTreeError::parse(
                format!("resolving '{name}'"),
                ParseErrorKind::ReferenceCycle {
                    chain: chain.join(" -> "),
                },
            ));
        }

        let entries = match self.raw.get(name) {
            Some(entries) => entries.clone(),
            None => self.read_referenced(name)?,
        };
        stack.push(name.to_string());
        let table = self.resolve_entries(&entries, stack)?;
        stack.pop();

        self.resolved.insert(name.to_string(), table.clone());
        Ok(table)
    }

    fn resolve_entries(&mut self, entries: &[RawEntry], stack: &mut Vec<String>) -> Result<NavTable> {
        entries
            .iter()
            .map(|raw| {
                let children = match &raw.children {
                    None => None,
                    Some(RawChildren::Inline(nested)) => Some(self.resolve_entries(nested, stack)?),
                    Some(RawChildren::Reference(name)) => Some(self.resolve_named(name, stack)?),
                };
                Ok(NavEntry {
                    label: raw.label.clone(),
                    link: raw.link.clone(),
                    children: children.filter(|c| !c.is_empty()),
                })
            })
            .collect()
    }

    fn read_referenced(&mut self, name: &str) -> Result<Vec<RawEntry>> {
        let Some(path) = TABLE_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{name}.{ext}")))
            .find(|p| p.is_file())
        else {
            return Err(NavTreeError::parse(
                format!("resolving '{name}'"),
                ParseErrorKind::UnresolvedReference {
                    name: name.to_string(),
                    searched: self.dir.clone(),
                },
            ));
        };

        tracing::debug!("reading table '{}' from {}", name, path.display());
        let content = read_table_file(&path)?;
        self.files_read += 1;
        let bundle = parse_table_str(&content, &path.display().to_string())?;
        for (table_name, entries) in bundle.into_tables() {
            // A bare JSON file is the table it was looked up as.
            let table_name = if table_name.is_empty() {
                name.to_string()
            } else {
                table_name
            };
            self.raw.entry(table_name).or_insert(entries);
        }
        self.raw.get(name).cloned().ok_or_else(|| {
            NavTreeError::parse(
                format!("in {}", path.display()),
                ParseErrorKind::UnresolvedReference {
                    name: name.to_string(),
                    searched: path.clone(),
                },
            )
        })
    }
}

fn read_table_file(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| NavTreeError::io(path, e))?;
    if metadata.len() > MAX_TABLE_FILE_SIZE {
        return Err(NavTreeError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_TABLE_FILE_SIZE / (1024 * 1024),
        )));
    }
    std::fs::read_to_string(path).map_err(|e| NavTreeError::io(path, e))
}
