//! Connector and toggle glyphs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Icon shown in front of a row's label.
///
/// One glyph per ancestor level (`Blank` or `VertLine`), followed by the
/// node's own connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    /// Leaf, more siblings follow
    Node,
    /// Leaf, last sibling
    LastNode,
    /// Collapsed group, more siblings follow
    PlusNode,
    /// Collapsed group, last sibling
    PlusLastNode,
    /// Expanded group, more siblings follow
    MinusNode,
    /// Expanded group, last sibling
    MinusLastNode,
    /// Ancestor level whose ancestor was a last child
    Blank,
    /// Ancestor level whose ancestor has further siblings
    VertLine,
}

impl Glyph {
    /// Connector for a freshly rendered (collapsed) node.
    pub const fn connector(has_children: bool, is_last: bool) -> Self {
        match (has_children, is_last) {
            (true, true) => Self::PlusLastNode,
            (true, false) => Self::PlusNode,
            (false, true) => Self::LastNode,
            (false, false) => Self::Node,
        }
    }

    /// Toggle icon for a group in the given state.
    pub const fn toggle(expanded: bool, is_last: bool) -> Self {
        match (expanded, is_last) {
            (true, true) => Self::MinusLastNode,
            (true, false) => Self::MinusNode,
            (false, true) => Self::PlusLastNode,
            (false, false) => Self::PlusNode,
        }
    }

    /// Indentation glyph contributed by an ancestor.
    pub const fn indent(ancestor_is_last: bool) -> Self {
        if ancestor_is_last {
            Self::Blank
        } else {
            Self::VertLine
        }
    }

    pub const fn is_toggle(self) -> bool {
        matches!(
            self,
            Self::PlusNode | Self::PlusLastNode | Self::MinusNode | Self::MinusLastNode
        )
    }

    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::MinusNode | Self::MinusLastNode)
    }

    /// Image file name used by HTML documentation trees.
    pub const fn image_name(self) -> &'static str {
        match self {
            Self::Node => "ftv2node.png",
            Self::LastNode => "ftv2lastnode.png",
            Self::PlusNode => "ftv2pnode.png",
            Self::PlusLastNode => "ftv2plastnode.png",
            Self::MinusNode => "ftv2mnode.png",
            Self::MinusLastNode => "ftv2mlastnode.png",
            Self::Blank => "ftv2blank.png",
            Self::VertLine => "ftv2vertline.png",
        }
    }

    /// Image source resolved against the relative path prefix.
    pub fn image_source(self, relpath: &str) -> String {
        format!("{relpath}{}", self.image_name())
    }
}

/// Character set used when glyphs are drawn as text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GlyphStyle {
    /// Box-drawing characters
    #[default]
    Unicode,
    /// Plain ASCII
    Ascii,
}

impl GlyphStyle {
    /// Three-column text for a glyph.
    pub const fn symbol(self, glyph: Glyph) -> &'static str {
        match self {
            Self::Unicode => match glyph {
                Glyph::Node => "├─ ",
                Glyph::LastNode => "└─ ",
                Glyph::PlusNode => "├▸ ",
                Glyph::PlusLastNode => "└▸ ",
                Glyph::MinusNode => "├▾ ",
                Glyph::MinusLastNode => "└▾ ",
                Glyph::Blank => "   ",
                Glyph::VertLine => "│  ",
            },
            Self::Ascii => match glyph {
                Glyph::Node => "|- ",
                Glyph::LastNode => "`- ",
                Glyph::PlusNode => "|> ",
                Glyph::PlusLastNode => "`> ",
                Glyph::MinusNode => "|v ",
                Glyph::MinusLastNode => "`v ",
                Glyph::Blank => "   ",
                Glyph::VertLine => "|  ",
            },
        }
    }
}
