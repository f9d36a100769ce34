//! Navigation table syntax.
//!
//! Two inputs are accepted:
//!
//! - a plain JSON array of `[label, link, children]` triples, and
//! - generator scripts holding one or more `var NAME = [...];`
//!   assignments, possibly followed by unrelated script code.
//!
//! In both, `link` is a string or `null`, and `children` is an array of
//! further triples, `null`, or the name of another table to load lazily.

use crate::error::{NavTreeError, ParseErrorKind, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static TABLE_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bvar\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*").expect("static regex")
});

/// Table syntax found in some input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSyntax {
    /// A bare JSON array
    Json,
    /// `var NAME = [...]` assignments
    Script,
}

/// Guess the syntax from the first non-blank character.
pub fn detect_syntax(content: &str) -> TableSyntax {
    if strip_bom(content).trim_start().starts_with('[') {
        TableSyntax::Json
    } else {
        TableSyntax::Script
    }
}

/// Children of a not yet resolved entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChildren {
    Inline(Vec<RawEntry>),
    /// Name of a table defined elsewhere
    Reference(String),
}

/// An entry as written, before references are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub label: String,
    pub link: Option<String>,
    pub children: Option<RawChildren>,
}

/// Tables found in one input, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBundle {
    tables: IndexMap<String, Vec<RawEntry>>,
}

impl TableBundle {
    /// The first table in the input; the one a page renders.
    pub fn primary(&self) -> Option<(&str, &[RawEntry])> {
        self.tables
            .first()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn get(&self, name: &str) -> Option<&[RawEntry]> {
        self.tables.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub(crate) fn into_tables(self) -> impl Iterator<Item = (String, Vec<RawEntry>)> {
        self.tables.into_iter()
    }
}

/// Parse every table in `content`. `origin` names the input in errors.
///
/// A bare JSON array is stored under the empty name.
pub fn parse_table_str(content: &str, origin: &str) -> Result<TableBundle> {
    let content = strip_bom(content);
    let mut bundle = TableBundle::default();
    match detect_syntax(content) {
        TableSyntax::Json => {
            let value: Value = serde_json::from_str(content).map_err(|e| {
                NavTreeError::parse(
                    format!("in {origin}"),
                    ParseErrorKind::InvalidJson(e.to_string()),
                )
            })?;
            let entries = entries_from(value, origin)?;
            bundle.tables.insert(String::new(), entries);
        }
        TableSyntax::Script => {
            let mut consumed = 0;
            for caps in TABLE_ASSIGNMENT.captures_iter(content) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                // Assignments inside an already parsed array are data, not tables.
                if whole.start() < consumed {
                    continue;
                }
                let rest = &content[whole.end()..];
                if !rest.starts_with('[') {
                    continue;
                }
                let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
                let value = match stream.next() {
                    Some(Ok(value)) => value,
                    // Once a table is found, later arrays belong to script code.
                    Some(Err(e)) if !bundle.is_empty() => {
                        tracing::debug!("skipping '{}' in {}: {}", name.as_str(), origin, e);
                        continue;
                    }
                    Some(Err(e)) => {
                        return Err(NavTreeError::parse(
                            format!("table '{}' in {origin}", name.as_str()),
                            ParseErrorKind::InvalidJson(e.to_string()),
                        ));
                    }
                    None => continue,
                };
                consumed = whole.end() + stream.byte_offset();
                if !is_table_shaped(&value) {
                    tracing::debug!("skipping non-table array '{}' in {}", name.as_str(), origin);
                    continue;
                }
                let entries = match entries_from(value, name.as_str()) {
                    Ok(entries) => entries,
                    Err(e) if !bundle.is_empty() => {
                        tracing::debug!("skipping '{}' in {}: {}", name.as_str(), origin, e);
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                tracing::trace!("parsed table '{}' ({} entries)", name.as_str(), entries.len());
                bundle.tables.insert(name.as_str().to_string(), entries);
            }
        }
    }

    if bundle.is_empty() {
        return Err(NavTreeError::no_table(origin));
    }
    Ok(bundle)
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// An array whose items are all arrays. Scripts also assign page indexes
/// and other flat arrays, which are not tables.
fn is_table_shaped(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.iter().all(Value::is_array))
}

fn entries_from(value: Value, context: &str) -> Result<Vec<RawEntry>> {
    let Value::Array(items) = value else {
        return Err(invalid(context, "expected an array of entries"));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| entry_from(item, &format!("{context}[{index}]")))
        .collect()
}

fn entry_from(item: Value, context: &str) -> Result<RawEntry> {
    let Value::Array(fields) = item else {
        return Err(invalid(context, "expected [label, link, children]"));
    };
    if fields.len() > 3 {
        return Err(invalid(context, "expected at most three fields"));
    }
    let mut fields = fields.into_iter();

    let label = match fields.next() {
        Some(Value::String(label)) => label,
        _ => return Err(invalid(context, "label must be a string")),
    };
    let link = match fields.next() {
        None | Some(Value::Null) => None,
        Some(Value::String(link)) => Some(link),
        Some(_) => return Err(invalid(context, "link must be a string or null")),
    };
    let children = match fields.next() {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(RawChildren::Reference(name)),
        Some(nested @ Value::Array(_)) => Some(RawChildren::Inline(entries_from(nested, context)?)),
        Some(_) => {
            return Err(invalid(
                context,
                "children must be an array, a table name or null",
            ));
        }
    };

    Ok(RawEntry {
        label,
        link,
        children,
    })
}

fn invalid(context: &str, message: &str) -> NavTreeError {
    NavTreeError::parse(
        format!("at {context}"),
        ParseErrorKind::InvalidJson(message.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let bundle = parse_table_str(r#"[["A", "a.html", null], ["B", null, [["B1", "b1.html"]]]]"#, "inline")
            .expect("valid table");
        let (name, entries) = bundle.primary().expect("one table");
        assert_eq!(name, "");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].link.as_deref(), Some("a.html"));
        assert!(matches!(&entries[1].children, Some(RawChildren::Inline(c)) if c[0].label == "B1"));
    }

    #[test]
    fn test_script_with_trailing_code() {
        let script = "var NAVTREE =\n[\n  [ \"Main\", \"index.html\", null ]\n];\n\nfunction createIndent(o) { var x = 1; }\n";
        let bundle = parse_table_str(script, "navtree.js").expect("valid script");
        assert_eq!(bundle.names().collect::<Vec<_>>(), ["NAVTREE"]);
        assert_eq!(bundle.get("NAVTREE").map(<[RawEntry]>::len), Some(1));
    }

    #[test]
    fn test_concatenated_tables_keep_order() {
        let script = r#"var modules =
[
    [ "Graph", "group__grp__graph.html", "group__grp__graph" ]
];var group__grp__graph =
[
    [ "PageRank", "group__grp__pagerank.html", null ]
];"#;
        let bundle = parse_table_str(script, "bundle.js").expect("valid script");
        assert_eq!(
            bundle.names().collect::<Vec<_>>(),
            ["modules", "group__grp__graph"]
        );
        let (_, modules) = bundle.primary().expect("primary");
        assert_eq!(
            modules[0].children,
            Some(RawChildren::Reference("group__grp__graph".to_string()))
        );
    }

    #[test]
    fn test_assignment_text_inside_labels_is_ignored() {
        let script = r#"var T = [ [ "var X = [ ]", null, null ] ];"#;
        let bundle = parse_table_str(script, "t.js").expect("valid script");
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn test_flat_arrays_are_skipped() {
        let script = r#"var NAVTREE = [ [ "Main", "index.html", null ] ];
var NAVTREEINDEX = [ "index.html", "modules.html" ];
var SYNCONMSG = 'click to disable panel synchronisation';"#;
        let bundle = parse_table_str(script, "navtree.js").expect("valid script");
        assert_eq!(bundle.names().collect::<Vec<_>>(), ["NAVTREE"]);
        assert!(parse_table_str(r#"var NAVTREEINDEX = [ "index.html" ];"#, "x").is_err());
    }

    #[test]
    fn test_arrays_in_trailing_code_are_skipped() {
        let script = "var NAVTREE =\n[\n  [ \"Main\", \"index.html\", null ]\n];\n\n\
            function f(url) { var parts = [url, 'x']; var pairs = [[1, 2]]; return parts; }\n";
        let bundle = parse_table_str(script, "navtree.js").expect("table before code parses");
        assert_eq!(bundle.names().collect::<Vec<_>>(), ["NAVTREE"]);
        let (_, entries) = bundle.primary().expect("primary");
        assert_eq!(entries[0].label, "Main");
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        assert_eq!(detect_syntax("\u{feff}[[\"A\", \"a.html\", null]]"), TableSyntax::Json);
        let bundle = parse_table_str("\u{feff}[[\"A\", \"a.html\", null]]", "bom.json")
            .expect("bom json parses");
        assert_eq!(bundle.primary().map(|(_, e)| e.len()), Some(1));
        let bundle = parse_table_str("\u{feff}var T = [ [ \"A\", null, null ] ];", "bom.js")
            .expect("bom script parses");
        assert_eq!(bundle.names().collect::<Vec<_>>(), ["T"]);
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!(parse_table_str(r#"[[1, "a.html"]]"#, "x").is_err());
        assert!(parse_table_str(r#"[["A", 2]]"#, "x").is_err());
        assert!(parse_table_str(r#"[["A", null, 7]]"#, "x").is_err());
        assert!(parse_table_str(r#"[["A", null, null, null]]"#, "x").is_err());
        assert!(parse_table_str("var T = [ [ \"A\"", "x").is_err());
    }

    #[test]
    fn test_no_table() {
        let err = parse_table_str("function f() {}", "empty.js").expect_err("no table");
        assert!(matches!(
            err,
            NavTreeError::Parse {
                source: ParseErrorKind::NoTable,
                ..
            }
        ));
    }

    #[test]
    fn test_detect_syntax() {
        assert_eq!(detect_syntax("  \n[ ]"), TableSyntax::Json);
        assert_eq!(detect_syntax("var NAVTREE = []"), TableSyntax::Script);
    }
}
