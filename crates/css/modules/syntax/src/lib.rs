//! CSS Syntax Module Level 3 — lossless stylesheet tree.
//! See <https://www.w3.org/TR/css-syntax-3/>
//!
//! The tree keeps every byte of whitespace it was parsed from in per-node
//! `raws`, so a stylesheet that is parsed and serialized without edits comes
//! back unchanged. Value-level rewriting passes only touch the fields they
//! edit and inherit the surrounding formatting.

#![forbid(unsafe_code)]

mod parser;
mod serialize;

use std::path::{Path, PathBuf};

pub use parser::{parse_stylesheet, parse_stylesheet_from};

/// Whitespace captured around a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationRaws {
    /// Text before the property name (whitespace and stray semicolons).
    pub before: String,
    /// Text between the property name and the value, including the colon.
    pub between: String,
    /// Raw `!important` tail including its leading whitespace, or empty.
    pub important: String,
    /// Whitespace between the value and a terminating semicolon.
    pub trailing: String,
}

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name exactly as written.
    pub property: String,
    /// Raw value text (without trailing !important).
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
    pub raws: DeclarationRaws,
}

impl Declaration {
    /// Clone this declaration with a different value, keeping its formatting.
    #[inline]
    #[must_use]
    pub fn cloned_with_value(&self, value: &str) -> Self {
        Self {
            value: value.to_owned(),
            ..self.clone()
        }
    }
}

/// Whitespace captured around a rule or a block at-rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockRaws {
    /// Text before the rule starts.
    pub before: String,
    /// Text between the prelude and `{` (or the terminating `;`).
    pub between: String,
    /// Text between the last child and `}`.
    pub after: String,
    /// Whether the last declaration in the block was followed by `;`.
    pub semicolon: bool,
}

/// A single style rule with a raw prelude and its child nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text (typically the selector list).
    pub selector: String,
    /// Declarations and nested rules within the rule block.
    pub nodes: Vec<Node>,
    pub raws: BlockRaws,
}

/// An at-rule such as `@media (min-width: 500px) { ... }` or `@import "x";`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the leading `@`.
    pub name: String,
    /// Prelude text between the name and the block or semicolon.
    pub params: String,
    /// Children when the at-rule has a block.
    pub nodes: Option<Vec<Node>>,
    /// Whitespace between the name and the params.
    pub after_name: String,
    pub raws: BlockRaws,
}

/// A comment, stored with its `/*` `*/` markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub before: String,
}

/// Text that is neither a rule nor a declaration (no colon, no block).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtherNode {
    pub text: String,
    pub before: String,
    /// Whether a `;` followed the text in the source.
    pub terminated: bool,
}

/// Any child of a stylesheet or block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Rule(StyleRule),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
    Other(OtherNode),
}

/// A parsed stylesheet consisting of top-level nodes in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
    /// Trailing text after the last node.
    pub after: String,
    /// Whether the last top-level declaration was followed by `;`.
    pub semicolon: bool,
    /// File the stylesheet was read from, when known.
    pub source: Option<PathBuf>,
}

impl Stylesheet {
    /// File the stylesheet was read from, when known.
    #[inline]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Iterate over the declarations in a list of sibling nodes.
#[inline]
pub fn declarations_in(nodes: &[Node]) -> impl Iterator<Item = &Declaration> {
    nodes.iter().filter_map(|node| match node {
        Node::Declaration(decl) => Some(decl),
        Node::Rule(_) | Node::AtRule(_) | Node::Comment(_) | Node::Other(_) => None,
    })
}

/// Split `!important` off the end of a value, returning (`value`, `raw_tail`).
///
/// The tail keeps the whitespace that preceded the `!` so it can be written
/// back unchanged; it is empty when the value is not important.
fn split_important_tail(value: &str) -> (&str, &str) {
    if let Some(pos) = value.rfind('!')
        && let Some(keyword) = value.get(pos + 1..)
        && keyword.trim().eq_ignore_ascii_case("important")
        && let Some(prefix) = value.get(..pos)
    {
        let head = prefix.trim_end();
        return value.split_at(head.len());
    }
    (value, "")
}
