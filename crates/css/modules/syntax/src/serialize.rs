//! Serialization of the stylesheet tree back to CSS text.

use core::fmt::{self, Display, Formatter};

use crate::{AtRule, Declaration, Node, StyleRule, Stylesheet};

impl Stylesheet {
    /// Serialize the stylesheet, reproducing the source formatting.
    #[inline]
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl Display for Stylesheet {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write_body(formatter, &self.nodes, self.semicolon)?;
        formatter.write_str(&self.after)
    }
}

/// Write sibling nodes. Every declaration-like node except the last
/// non-comment one is followed by `;`; the last gets one only when the
/// container's source had it.
fn write_body(formatter: &mut Formatter<'_>, nodes: &[Node], semicolon: bool) -> fmt::Result {
    let last = nodes
        .iter()
        .rposition(|node| !matches!(node, Node::Comment(_)));
    for (index, node) in nodes.iter().enumerate() {
        write_node(formatter, node, Some(index) != last || semicolon)?;
    }
    Ok(())
}

fn write_node(formatter: &mut Formatter<'_>, node: &Node, terminate: bool) -> fmt::Result {
    match node {
        Node::Declaration(decl) => write_declaration(formatter, decl, terminate),
        Node::Rule(rule) => write_rule(formatter, rule),
        Node::AtRule(at_rule) => write_at_rule(formatter, at_rule, terminate),
        Node::Comment(comment) => {
            formatter.write_str(&comment.before)?;
            formatter.write_str(&comment.text)
        }
        Node::Other(other) => {
            formatter.write_str(&other.before)?;
            formatter.write_str(&other.text)?;
            if other.terminated {
                formatter.write_str(";")?;
            }
            Ok(())
        }
    }
}

fn write_declaration(formatter: &mut Formatter<'_>, decl: &Declaration, terminate: bool) -> fmt::Result {
    let raws = &decl.raws;
    formatter.write_str(&raws.before)?;
    formatter.write_str(&decl.property)?;
    formatter.write_str(&raws.between)?;
    formatter.write_str(&decl.value)?;
    if decl.important {
        if raws.important.is_empty() {
            formatter.write_str(" !important")?;
        } else {
            formatter.write_str(&raws.important)?;
        }
    }
    if terminate {
        formatter.write_str(&raws.trailing)?;
        formatter.write_str(";")?;
    }
    Ok(())
}

fn write_rule(formatter: &mut Formatter<'_>, rule: &StyleRule) -> fmt::Result {
    formatter.write_str(&rule.raws.before)?;
    formatter.write_str(&rule.selector)?;
    formatter.write_str(&rule.raws.between)?;
    formatter.write_str("{")?;
    write_body(formatter, &rule.nodes, rule.raws.semicolon)?;
    formatter.write_str(&rule.raws.after)?;
    formatter.write_str("}")
}

fn write_at_rule(formatter: &mut Formatter<'_>, at_rule: &AtRule, terminate: bool) -> fmt::Result {
    let raws = &at_rule.raws;
    formatter.write_str(&raws.before)?;
    formatter.write_str("@")?;
    formatter.write_str(&at_rule.name)?;
    formatter.write_str(&at_rule.after_name)?;
    formatter.write_str(&at_rule.params)?;
    formatter.write_str(&raws.between)?;
    match &at_rule.nodes {
        Some(nodes) => {
            formatter.write_str("{")?;
            write_body(formatter, nodes, raws.semicolon)?;
            formatter.write_str(&raws.after)?;
            formatter.write_str("}")
        }
        None if terminate => formatter.write_str(";"),
        None => Ok(()),
    }
}
