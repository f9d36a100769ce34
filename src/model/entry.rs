//! Static navigation entries.

use std::ops::Deref;
use std::sync::Arc;

/// One item of the static navigation table.
///
/// Mirrors the generator's `[label, link, children]` triple. A `link` of
/// `Some("")` is treated like no link at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub link: Option<String>,
    pub children: Option<NavTable>,
}

impl NavEntry {
    /// Create an entry without children.
    pub fn leaf(label: impl Into<String>, link: Option<&str>) -> Self {
        Self {
            label: label.into(),
            link: link.map(str::to_string),
            children: None,
        }
    }

    /// Create an entry with children. An empty child list is stored as `None`.
    pub fn group(label: impl Into<String>, link: Option<&str>, children: Vec<Self>) -> Self {
        Self {
            label: label.into(),
            link: link.map(str::to_string),
            children: (!children.is_empty()).then(|| NavTable::from(children)),
        }
    }

    /// The entry's link, ignoring empty strings.
    pub fn target(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.is_empty())
    }

    /// Whether the entry declares at least one child.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// How the entry's label behaves when rendered.
    pub fn row_kind(&self) -> RowKind<'_> {
        RowKind::classify(self.target(), self.children.as_ref())
    }

    /// Total number of entries in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.as_ref().map_or(0, NavTable::total_len)
    }
}

/// Label behavior of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind<'a> {
    /// The label navigates to `target` (resolved against the relative path prefix)
    Linked { target: &'a str },
    /// No link, but children: the label toggles the subtree
    Expandable { children: &'a NavTable },
    /// No link and no children: plain text
    Leaf,
}

impl<'a> RowKind<'a> {
    pub(crate) fn classify(target: Option<&'a str>, children: Option<&'a NavTable>) -> Self {
        match (target, children) {
            (Some(target), _) => Self::Linked { target },
            (None, Some(children)) if !children.is_empty() => Self::Expandable { children },
            (None, _) => Self::Leaf,
        }
    }
}

/// An immutable, shared, ordered sequence of [`NavEntry`].
///
/// Cloning is a reference-count bump, so tree nodes can hold on to their
/// children source without borrowing from the table's owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavTable(Arc<[NavEntry]>);

impl NavTable {
    /// Create a table from entries.
    pub fn new(entries: Vec<NavEntry>) -> Self {
        Self(entries.into())
    }

    /// Borrow the entries.
    pub fn entries(&self) -> &[NavEntry] {
        &self.0
    }

    /// Total number of entries at every depth.
    pub fn total_len(&self) -> usize {
        self.0.iter().map(NavEntry::subtree_len).sum()
    }

    /// Follow an index path from this table, returning the entry it names.
    pub fn entry_at(&self, path: &[usize]) -> Option<&NavEntry> {
        let (first, rest) = path.split_first()?;
        let mut entry = self.0.get(*first)?;
        for &index in rest {
            entry = entry.children.as_ref()?.0.get(index)?;
        }
        Some(entry)
    }
}

impl Deref for NavTable {
    type Target = [NavEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<NavEntry>> for NavTable {
    fn from(entries: Vec<NavEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<NavEntry> for NavTable {
    fn from_iter<I: IntoIterator<Item = NavEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NavTable {
    type Item = &'a NavEntry;
    type IntoIter = std::slice::Iter<'a, NavEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
