//! Headless rendering of a tree for one page.

use super::OutputFormat;
use crate::host::{Document, ElementId, GlyphStyle, VisibleRow};
use crate::model::NavTable;
use crate::tree::{NavTree, TreeOptions, find_path};
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

/// The visible state of a tree after its page load.
#[derive(Debug, Clone, Serialize)]
pub struct TreeSnapshot {
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub scroll_top: usize,
    pub rows: Vec<SnapshotRow>,
}

/// A visible row with the icon images an HTML page would show for it.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRow {
    #[serde(flatten)]
    pub row: VisibleRow,
    pub icons: Vec<String>,
}

impl TreeSnapshot {
    pub fn capture(document: &Document, tree: &NavTree<ElementId>) -> Self {
        Self {
            page: tree.options().page.clone(),
            breadcrumb: tree.breadcrumb().map(<[usize]>::to_vec),
            selected: tree
                .selected()
                .and_then(|id| tree.node(id))
                .map(|node| node.label().to_string()),
            scroll_top: document.scroll_top(),
            rows: document
                .visible_rows()
                .into_iter()
                .map(|row| {
                    let relpath = &tree.options().relpath;
                    let icons = row.glyphs.iter().map(|g| g.image_source(relpath)).collect();
                    SnapshotRow { row, icons }
                })
                .collect(),
        }
    }
}

/// Run a page load against an in-memory document.
pub fn build_document(
    table: &NavTable,
    options: TreeOptions,
) -> crate::Result<(Document, NavTree<ElementId>)> {
    let mut document = Document::with_anchor(&options.anchor);
    let tree = NavTree::init(table.clone(), options, &mut document)?;
    Ok((document, tree))
}

/// Render the tree for a page as text or JSON.
pub fn render_tree(
    table: &NavTable,
    options: TreeOptions,
    format: OutputFormat,
    glyphs: GlyphStyle,
) -> Result<String> {
    let (document, tree) = build_document(table, options)?;
    tracing::debug!(
        "rendered {} of {} nodes",
        document.visible_rows().len(),
        tree.node_count() - 1
    );
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&TreeSnapshot::capture(&document, &tree))?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Auto | OutputFormat::Tui | OutputFormat::Text => {
            Ok(document.render_text(glyphs))
        }
    }
}

/// Where a page sits in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbReport {
    /// Page that was asked for
    pub page: String,
    /// Page that matched (the index page when falling back)
    pub matched: String,
    pub fallback: bool,
    pub path: Vec<usize>,
    /// Labels from the top level down to the match
    pub labels: Vec<String>,
}

impl BreadcrumbReport {
    /// Resolve `page`, trying `fallback` when it is not in the table.
    pub fn resolve(table: &NavTable, page: &str, fallback: Option<&str>) -> Option<Self> {
        let (matched, path) = match find_path(page, table) {
            Some(path) => (page, path),
            None => {
                let fallback = fallback?;
                (fallback, find_path(fallback, table)?)
            }
        };
        let labels = (1..=path.len())
            .filter_map(|depth| table.entry_at(&path[..depth]))
            .map(|entry| entry.label.clone())
            .collect();
        Some(Self {
            page: page.to_string(),
            matched: matched.to_string(),
            fallback: matched != page,
            path,
            labels,
        })
    }

    /// `1/0  Modules > Graph`, with a note when the fallback matched.
    pub fn to_text(&self) -> String {
        let indices: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        let mut line = format!("{}  {}", indices.join("/"), self.labels.join(" > "));
        if self.fallback {
            let _ = write!(line, "  (fallback: {})", self.matched);
        }
        line.push('\n');
        line
    }
}
