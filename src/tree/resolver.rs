//! Breadcrumb path resolution.

use crate::model::NavEntry;

/// Find the index path to the first entry (pre-order) whose link equals `target`.
///
/// ```
/// use navtree::model::{NavEntry, NavTable};
/// use navtree::tree::find_path;
///
/// let table = NavTable::from(vec![
///     NavEntry::leaf("A", Some("a.html")),
///     NavEntry::group("B", None, vec![NavEntry::leaf("B1", Some("b1.html"))]),
/// ]);
/// assert_eq!(find_path("b1.html", &table), Some(vec![1, 0]));
/// assert_eq!(find_path("zzz.html", &table), None);
/// ```
pub fn find_path(target: &str, entries: &[NavEntry]) -> Option<Vec<usize>> {
    let mut path = Vec::new();
    search(target, entries, &mut path).then_some(path)
}

fn search(target: &str, entries: &[NavEntry], path: &mut Vec<usize>) -> bool {
    for (index, entry) in entries.iter().enumerate() {
        path.push(index);
        if entry.link.as_deref() == Some(target) {
            return true;
        }
        if let Some(children) = &entry.children
            && search(target, children, path)
        {
            return true;
        }
        path.pop();
    }
    false
}

/// Resolve `target`, falling back to `fallback` when it is absent.
pub fn find_path_or_fallback(
    target: &str,
    fallback: &str,
    entries: &[NavEntry],
) -> Option<Vec<usize>> {
    find_path(target, entries).or_else(|| {
        tracing::debug!("page '{}' not in navigation table, trying '{}'", target, fallback);
        find_path(fallback, entries)
    })
}
