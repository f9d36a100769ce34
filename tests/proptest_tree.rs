//! Property-based tests for tree construction and path resolution.
//!
//! Tables are generated as random nested entry lists; links are drawn from
//! a small pool so duplicates are common and first-match rules get exercised.

use navtree::{Document, NavEntry, NavTable, NavTree, NodeId, TreeOptions, find_path, parse_table};
use proptest::prelude::*;

fn arb_entry() -> impl Strategy<Value = NavEntry> {
    let leaf = ("[A-Za-z ]{1,12}", prop::option::of(0u8..24)).prop_map(|(label, link)| {
        let link = link.map(|n| format!("page{n}.html"));
        NavEntry::leaf(label, link.as_deref())
    });
    leaf.prop_recursive(4, 64, 6, |inner| {
        (
            "[A-Za-z ]{1,12}",
            prop::option::of(0u8..24),
            prop::collection::vec(inner, 0..6),
        )
            .prop_map(|(label, link, children)| {
                let link = link.map(|n| format!("page{n}.html"));
                NavEntry::group(label, link.as_deref(), children)
            })
    })
}

fn arb_table() -> impl Strategy<Value = NavTable> {
    prop::collection::vec(arb_entry(), 0..8).prop_map(NavTable::from)
}

/// Every (path, link) pair in pre-order.
fn preorder_links(entries: &[NavEntry], prefix: &mut Vec<usize>, out: &mut Vec<(Vec<usize>, String)>) {
    for (index, entry) in entries.iter().enumerate() {
        prefix.push(index);
        if let Some(link) = &entry.link {
            out.push((prefix.clone(), link.clone()));
        }
        if let Some(children) = &entry.children {
            preorder_links(children, prefix, out);
        }
        prefix.pop();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn find_path_returns_first_preorder_match(table in arb_table(), n in 0u8..24) {
        let target = format!("page{n}.html");
        let mut links = Vec::new();
        preorder_links(&table, &mut Vec::new(), &mut links);
        let expected = links.into_iter().find(|(_, link)| *link == target).map(|(path, _)| path);

        let found = find_path(&target, &table);
        prop_assert_eq!(&found, &expected);
        if let Some(path) = found {
            let entry = table.entry_at(&path);
            prop_assert_eq!(entry.and_then(|e| e.link.as_deref()), Some(target.as_str()));
        }
    }

    #[test]
    fn init_selects_the_resolved_page(table in arb_table(), n in 0u8..24) {
        let page = format!("page{n}.html");
        let expected = find_path(&page, &table);
        let mut doc = Document::new();
        let tree = NavTree::init(table, TreeOptions::new(page.as_str()).index_page("none.html"), &mut doc)
            .expect("tree builds");

        prop_assert_eq!(tree.breadcrumb(), expected.as_deref());
        match &expected {
            Some(path) => {
                let selected = tree.selected().expect("a page is selected");
                prop_assert_eq!(tree.node_at_path(path), Some(selected));
                for ancestor in tree.ancestors(selected) {
                    let node = tree.node(ancestor).expect("ancestor exists");
                    prop_assert!(node.is_root() || node.is_expanded());
                }
            }
            None => prop_assert!(tree.selected().is_none()),
        }
    }

    #[test]
    fn materialized_nodes_are_consistent(table in arb_table(), n in 0u8..24) {
        let mut doc = Document::new();
        let tree = NavTree::init(table, TreeOptions::new(format!("page{n}.html")), &mut doc)
            .expect("tree builds");

        for (id, node) in tree.nodes() {
            if let Some(parent_id) = node.parent() {
                let parent = tree.node(parent_id).expect("parent exists");
                prop_assert_eq!(node.depth(), parent.depth() + 1);
                prop_assert!(parent.children_visited());
                let position = parent.children().iter().position(|c| *c == id);
                prop_assert!(position.is_some());
                let is_last = position == Some(parent.children().len() - 1);
                prop_assert_eq!(node.is_last(), is_last);
            } else {
                prop_assert_eq!(id, NodeId::ROOT);
            }
            if node.children_visited() {
                let declared = node.children_source().map_or(0, |s| s.len());
                prop_assert_eq!(node.children().len(), declared);
            }
        }
    }

    #[test]
    fn toggling_never_duplicates_rows(
        table in arb_table(),
        clicks in prop::collection::vec(0usize..64, 0..40),
    ) {
        let mut doc = Document::new();
        let mut tree = NavTree::init(table, TreeOptions::new("none.html"), &mut doc)
            .expect("tree builds");

        for click in clicks {
            let ids: Vec<NodeId> = tree.nodes().map(|(id, _)| id).collect();
            let id = ids[click % ids.len()];
            let before = tree.node_count();
            let visited = tree.node(id).is_some_and(|n| n.children_visited());
            tree.toggle(id, &mut doc);
            if visited {
                prop_assert_eq!(tree.node_count(), before);
            }
            let visited = tree.node(id).is_some_and(|n| n.children_visited());
            prop_assert!(visited || !tree.node(id).is_some_and(|n| n.is_expanded()));
        }
        prop_assert!(tree.node_count() <= tree.table().total_len() + 1);
    }

    #[test]
    fn parse_table_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_table(&s);
    }

    #[test]
    fn script_like_input_doesnt_panic(
        name in "[A-Za-z_][A-Za-z0-9_]{0,12}",
        body in "\\PC{0,400}",
    ) {
        let _ = parse_table(&format!("var {name} = [{body}];"));
    }

    #[test]
    fn generated_tables_parse_back(table in arb_table()) {
        let json = to_json(&table).to_string();
        let parsed = parse_table(&json).expect("generated table parses");
        prop_assert_eq!(parsed, table);
    }
}

fn to_json(entries: &[NavEntry]) -> serde_json::Value {
    serde_json::Value::Array(
        entries
            .iter()
            .map(|e| {
                serde_json::json!([
                    e.label,
                    e.link,
                    e.children.as_ref().map(|c| to_json(c))
                ])
            })
            .collect(),
    )
}
