//! Integration tests for loading navigation tables from disk.

use navtree::error::{NavTreeError, ParseErrorKind};
use navtree::parsers::TableLoader;
use navtree::pipeline::{BreadcrumbReport, load_table_with_context};
use navtree::{Document, GlyphStyle, NavTree, TreeOptions, find_path, load_table};
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

#[test]
fn test_load_inline_table() {
    let table = load_table(&fixture_path("legacy/navtree.js")).expect("fixture loads");
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].label, "MADlib");
    assert_eq!(table.total_len(), 14);
    assert_eq!(find_path("files.html", &table), Some(vec![0, 2, 0]));
}

#[test]
fn test_load_split_tables() {
    let loaded = load_table_with_context(&fixture_path("split/navtree.js"), None, true)
        .expect("split tables resolve");
    assert_eq!(loaded.files_read, 3);
    assert_eq!(loaded.entry_count(), 11);

    let table = &loaded.table;
    assert_eq!(
        find_path("group__grp__graph__closeness.html", table),
        Some(vec![0, 1, 1, 2, 1])
    );
    let measures = table.entry_at(&[0, 1, 1, 2]).expect("Measures");
    assert_eq!(measures.label, "Measures");
    assert_eq!(measures.children.as_ref().map(|c| c.len()), Some(2));
}

#[test]
fn test_split_tables_render_like_inline_ones() {
    let table = load_table(&fixture_path("split/navtree.js")).expect("loads");
    let mut doc = Document::new();
    NavTree::init(table, TreeOptions::new("group__grp__pagerank.html"), &mut doc)
        .expect("builds");
    assert_eq!(
        doc.render_text(GlyphStyle::Ascii),
        "\
`v MADlib
   |- Main Page
   `v Modules
      |- Cross Validation
      `v Graph
         |- All Pairs Shortest Path
         |- Breadth-First Search
         |> Measures
         `- PageRank <=
"
    );
}

#[test]
fn test_loader_reuses_resolved_tables() {
    let mut loader = TableLoader::new(fixture_path("split"));
    let table = loader
        .load_file(&fixture_path("split/modules.js"))
        .expect("modules loads");
    assert_eq!(table.len(), 2);
    assert_eq!(loader.files_read(), 2);
    assert!(loader.table("group__grp__graph").is_ok());
}

#[test]
fn test_missing_reference_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let main = dir.path().join("navtree.js");
    std::fs::write(
        &main,
        r#"var NAVTREE = [ [ "Files", "files.html", "files_dup" ] ];"#,
    )
    .expect("write");

    let err = load_table(&main).expect_err("reference cannot resolve");
    assert!(matches!(
        err,
        NavTreeError::Parse {
            source: ParseErrorKind::UnresolvedReference { .. },
            ..
        }
    ));
}

#[test]
fn test_reference_cycle_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("navtree.js"),
        r#"var NAVTREE = [ [ "A", "a.html", "a" ] ];"#,
    )
    .expect("write");
    std::fs::write(dir.path().join("a.js"), r#"var a = [ [ "B", "b.html", "b" ] ];"#)
        .expect("write");
    std::fs::write(dir.path().join("b.js"), r#"var b = [ [ "A again", null, "a" ] ];"#)
        .expect("write");

    let err = load_table(&dir.path().join("navtree.js")).expect_err("cycle");
    let NavTreeError::Parse { source, .. } = err else {
        panic!("expected a parse error");
    };
    assert!(matches!(source, ParseErrorKind::ReferenceCycle { .. }));
}

#[test]
fn test_breadcrumb_report_for_split_table() {
    let table = load_table(&fixture_path("split/navtree.js")).expect("loads");
    let report = BreadcrumbReport::resolve(&table, "group__grp__bfs.html", Some("index.html"))
        .expect("found");
    assert_eq!(report.path, vec![0, 1, 1, 1]);
    assert_eq!(
        report.to_text(),
        "0/1/1/1  MADlib > Modules > Graph > Breadth-First Search\n"
    );
}
