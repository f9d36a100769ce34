//! End-to-end tests for building, expanding and resolving navigation trees.

use navtree::host::{Document, EffectId, ElementId};
use navtree::{
    ClickAction, EffectStatus, GlyphStyle, Host, NavEntry, NavTable, NavTree, NodeId, Reveal,
    ToggleOutcome, TreeOptions, Viewport, find_path,
};
use std::path::Path;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn scenario_a() -> NavTable {
    NavTable::from(vec![
        NavEntry::leaf("A", Some("a.html")),
        NavEntry::group("B", None, vec![NavEntry::leaf("B1", Some("b1.html"))]),
    ])
}

/// Host that logs the calls the tree makes, drawing into a [`Document`].
#[derive(Default)]
struct Recorder {
    doc: Document,
    log: Vec<String>,
    /// Turn every reveal into a slide, as a host that always animates would.
    slide_everything: bool,
}

impl Host for Recorder {
    type Handle = ElementId;

    fn attach_root(&mut self, anchor: &str) -> navtree::Result<ElementId> {
        self.doc.attach_root(anchor)
    }

    fn create_child_list(&mut self, row: &ElementId) -> ElementId {
        self.doc.create_child_list(row)
    }

    fn create_row(&mut self, list: &ElementId, label: &str) -> ElementId {
        self.log.push(format!("row {label}"));
        self.doc.create_row(list, label)
    }

    fn set_link(&mut self, row: &ElementId, href: &str) {
        self.doc.set_link(row, href);
    }

    fn create_icon(&mut self, row: &ElementId, glyph: navtree::Glyph) -> ElementId {
        self.doc.create_icon(row, glyph)
    }

    fn set_icon(&mut self, icon: &ElementId, glyph: navtree::Glyph) {
        self.doc.set_icon(icon, glyph);
    }

    fn on_click(&mut self, element: &ElementId, action: ClickAction) {
        self.doc.on_click(element, action);
    }

    fn show(&mut self, element: &ElementId, reveal: Reveal) -> EffectStatus {
        self.log.push(format!("show {reveal:?}"));
        let reveal = if self.slide_everything { Reveal::Slide } else { reveal };
        self.doc.show(element, reveal)
    }

    fn hide(&mut self, element: &ElementId, reveal: Reveal) -> EffectStatus {
        self.log.push(format!("hide {reveal:?}"));
        self.doc.hide(element, reveal)
    }

    fn mark_selected(&mut self, row: &ElementId, id: &str) {
        let label = self.doc.label(*row).unwrap_or_default().to_string();
        self.log.push(format!("select {label}"));
        self.doc.mark_selected(row, id);
    }

    fn viewport(&self) -> Viewport {
        self.doc.viewport()
    }

    fn scroll_to(&mut self, element: &ElementId, offset: i64) {
        self.log.push(format!("scroll {offset}"));
        self.doc.scroll_to(element, offset);
    }

    fn poll_finished(&mut self) -> Vec<EffectId> {
        self.doc.poll_finished()
    }
}

// ============================================================================
// Page load
// ============================================================================

#[test]
fn test_scenario_a_selects_nested_page() {
    let mut doc = Document::new();
    let tree = NavTree::init(scenario_a(), TreeOptions::new("b1.html"), &mut doc)
        .expect("tree builds");

    assert_eq!(tree.breadcrumb(), Some(&[1, 0][..]));
    let b = tree.node_at_path(&[1]).expect("B materialized");
    let b1 = tree.node_at_path(&[1, 0]).expect("B1 materialized");
    assert!(tree.node(b).is_some_and(|n| n.is_expanded()));
    assert_eq!(tree.selected(), Some(b1));
    assert_eq!(doc.render_text(GlyphStyle::Ascii), "|- A\n`v B\n   `- B1 <=\n");
}

#[test]
fn test_scenario_b_falls_back_to_index_page() {
    let table = NavTable::from(vec![
        NavEntry::leaf("Main Page", Some("index.html")),
        NavEntry::group("B", None, vec![NavEntry::leaf("B1", Some("b1.html"))]),
    ]);
    let mut doc = Document::new();
    let tree = NavTree::init(table, TreeOptions::new("missing.html"), &mut doc)
        .expect("tree builds");

    assert_eq!(tree.breadcrumb(), Some(&[0][..]));
    assert_eq!(doc.render_text(GlyphStyle::Ascii), "|- Main Page <=\n`> B\n");
}

#[test]
fn test_scenario_b_without_index_stays_collapsed() {
    let mut doc = Document::new();
    let tree = NavTree::init(scenario_a(), TreeOptions::new("missing.html"), &mut doc)
        .expect("missing pages are not errors");

    assert!(tree.breadcrumb().is_none());
    assert!(tree.selected().is_none());
    assert_eq!(tree.node_count(), 3);
    assert!(tree.root().is_expanded(), "top level is attached");
    let b = tree.node_at_path(&[1]).expect("B");
    assert!(!tree.node(b).is_some_and(|n| n.is_expanded()));
    assert_eq!(doc.render_text(GlyphStyle::Ascii), "|- A\n`> B\n");
    assert_eq!(doc.scroll_generation(), 0);
}

#[test]
fn test_breadcrumb_expansion_order() {
    let table = NavTable::from(vec![
        NavEntry::leaf("A", Some("a.html")),
        NavEntry::leaf("B", Some("b.html")),
        NavEntry::group(
            "C",
            None,
            vec![NavEntry::group(
                "C0",
                None,
                vec![
                    NavEntry::leaf("C00", Some("c00.html")),
                    NavEntry::leaf("C01", Some("target.html")),
                ],
            )],
        ),
    ]);
    assert_eq!(find_path("target.html", &table), Some(vec![2, 0, 1]));

    let mut host = Recorder::default();
    let tree = NavTree::init(table, TreeOptions::new("target.html"), &mut host)
        .expect("tree builds");

    assert_eq!(
        host.log,
        vec![
            "row A",
            "row B",
            "row C",
            "row C0",
            "show Immediate",
            "row C00",
            "row C01",
            "show Immediate",
            "select C01",
            "scroll -11",
        ]
    );
    assert_eq!(tree.breadcrumb(), Some(&[2, 0, 1][..]));
}

#[test]
fn test_first_match_wins_for_duplicate_links() {
    let table = navtree::load_table(&Path::new(FIXTURES_DIR).join("legacy/navtree.js"))
        .expect("fixture loads");
    // "MADlib" and "Main Page" both link to index.html.
    assert_eq!(find_path("index.html", &table), Some(vec![0]));

    let mut doc = Document::new();
    let tree = NavTree::init(table, TreeOptions::new("index.html"), &mut doc).expect("builds");
    let madlib = tree.node_at_path(&[0]).expect("MADlib");
    assert_eq!(tree.selected(), Some(madlib));
}

#[test]
fn test_deep_page_renders_expanded_path() {
    let table = navtree::load_table(&Path::new(FIXTURES_DIR).join("legacy/navtree.js"))
        .expect("fixture loads");
    let mut doc = Document::new();
    let tree = NavTree::init(table, TreeOptions::new("group__grp__linreg.html"), &mut doc)
        .expect("builds");
    assert_eq!(tree.breadcrumb(), Some(&[0, 1, 0, 0, 1][..]));

    insta::assert_snapshot!(doc.render_text(GlyphStyle::Unicode), @r"
└▾ MADlib
   ├─ Main Page
   ├▾ Modules
   │  ├▾ Data Modeling
   │  │  ├▾ Supervised Learning
   │  │  │  ├─ Naive Bayes Classification
   │  │  │  ├─ Linear Regression <=
   │  │  │  └─ Logistic Regression
   │  │  └▸ Unsupervised Learning
   │  └▸ Descriptive Statistics
   └▸ Files
");
}

// ============================================================================
// Toggling
// ============================================================================

#[test]
fn test_toggle_round_trip_keeps_rows() {
    let table = NavTable::from(vec![NavEntry::group(
        "G",
        None,
        vec![
            NavEntry::leaf("G1", Some("g1.html")),
            NavEntry::leaf("G2", Some("g2.html")),
        ],
    )]);
    let mut doc = Document::new();
    let mut tree = NavTree::init(table, TreeOptions::new("none.html"), &mut doc).expect("builds");
    let g = tree.node_at_path(&[0]).expect("G");
    let before = doc.render_text(GlyphStyle::Ascii);

    assert_eq!(
        tree.toggle(g, &mut doc),
        ToggleOutcome::Expanded(EffectStatus::Done)
    );
    let elements = doc.element_count();
    assert_eq!(doc.render_text(GlyphStyle::Ascii), "`v G\n   |- G1\n   `- G2\n");

    assert_eq!(
        tree.toggle(g, &mut doc),
        ToggleOutcome::Collapsed(EffectStatus::Done)
    );
    assert_eq!(doc.render_text(GlyphStyle::Ascii), before);
    assert_eq!(doc.element_count(), elements);

    let node = tree.node(g).expect("G");
    assert!(node.children_visited());
    assert!(!node.is_expanded());
    assert_eq!(node.children().len(), 2);

    tree.toggle(g, &mut doc);
    assert_eq!(doc.element_count(), elements, "re-expanding creates no rows");
}

#[test]
fn test_click_dispatch_through_host() {
    let mut doc = Document::new();
    let mut tree = NavTree::init(scenario_a(), TreeOptions::new("a.html"), &mut doc)
        .expect("builds");
    let rows = doc.visible_rows();
    let action = rows[1].toggle.expect("B is clickable");
    assert_eq!(action, ClickAction::Toggle(tree.node_at_path(&[1]).expect("B")));

    tree.handle_click(action, &mut doc);
    assert_eq!(doc.render_text(GlyphStyle::Ascii), "|- A <=\n`v B\n   `- B1\n");
}

#[test]
fn test_toggle_is_ignored_while_sliding() {
    let mut doc = Document::new().animated(true);
    let mut tree = NavTree::init(scenario_a(), TreeOptions::new("a.html"), &mut doc)
        .expect("builds");
    let b = tree.node_at_path(&[1]).expect("B");

    assert!(matches!(
        tree.toggle(b, &mut doc),
        ToggleOutcome::Expanded(EffectStatus::Pending(_))
    ));
    assert!(tree.is_busy(b));
    assert_eq!(tree.toggle(b, &mut doc), ToggleOutcome::Busy);

    doc.finish_effects();
    tree.pump(&mut doc);
    assert!(tree.is_settled());
    assert!(matches!(
        tree.toggle(b, &mut doc),
        ToggleOutcome::Collapsed(EffectStatus::Pending(_))
    ));
}

#[test]
fn test_root_and_leaves_do_not_toggle() {
    let mut doc = Document::new();
    let mut tree = NavTree::init(scenario_a(), TreeOptions::new("a.html"), &mut doc)
        .expect("builds");
    let a = tree.node_at_path(&[0]).expect("A");

    assert_eq!(tree.toggle(NodeId::ROOT, &mut doc), ToggleOutcome::Unchanged);
    assert_eq!(tree.toggle(a, &mut doc), ToggleOutcome::Leaf);
}

#[test]
fn test_independent_trees_share_a_table() {
    let table = scenario_a();
    let mut first = Document::new();
    let mut second = Document::new();
    let one = NavTree::init(table.clone(), TreeOptions::new("a.html"), &mut first).expect("one");
    let two = NavTree::init(table, TreeOptions::new("b1.html"), &mut second).expect("two");

    assert_ne!(one.breadcrumb(), two.breadcrumb());
    assert_eq!(first.render_text(GlyphStyle::Ascii), "|- A <=\n`> B\n");
    assert_eq!(second.render_text(GlyphStyle::Ascii), "|- A\n`v B\n   `- B1 <=\n");
}

// ============================================================================
// Animated hosts
// ============================================================================

#[test]
fn test_breadcrumb_walk_resumes_after_each_slide() {
    let table = NavTable::from(vec![NavEntry::group(
        "C",
        None,
        vec![NavEntry::group(
            "C0",
            None,
            vec![NavEntry::leaf("T", Some("t.html"))],
        )],
    )]);
    let mut host = Recorder {
        doc: Document::new().animated(true),
        slide_everything: true,
        ..Recorder::default()
    };
    let mut tree = NavTree::init(table, TreeOptions::new("t.html"), &mut host).expect("builds");

    assert!(!tree.is_settled());
    assert_eq!(tree.selected(), None);

    for _ in 0..2 {
        assert_eq!(tree.selected(), None);
        host.doc.finish_effects();
        tree.pump(&mut host);
    }

    assert!(tree.is_settled());
    assert_eq!(tree.selected(), tree.node_at_path(&[0, 0, 0]));
    assert_eq!(
        host.doc.render_text(GlyphStyle::Ascii),
        "`v C\n   `v C0\n      `- T <=\n"
    );
    assert_eq!(host.doc.scroll_generation(), 1);
}

#[test]
fn test_finished_open_recenters_but_close_does_not() {
    let mut doc = Document::new().animated(true);
    let mut tree = NavTree::init(scenario_a(), TreeOptions::new("a.html"), &mut doc)
        .expect("builds");
    let b = tree.node_at_path(&[1]).expect("B");
    let after_init = doc.scroll_generation();
    assert_eq!(after_init, 1);

    tree.toggle(b, &mut doc);
    assert_eq!(doc.scroll_generation(), after_init);
    doc.finish_effects();
    tree.pump(&mut doc);
    let after_open = doc.scroll_generation();
    assert!(after_open > after_init);

    tree.toggle(b, &mut doc);
    doc.finish_effects();
    tree.pump(&mut doc);
    assert!(tree.is_settled());
    assert_eq!(doc.scroll_generation(), after_open);
}
