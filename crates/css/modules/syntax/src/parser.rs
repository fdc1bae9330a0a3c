//! Lossless stylesheet parsing on top of the `cssparser` tokenizer.
//!
//! Blocks are entered with `parse_nested_block`. Function, parenthesis and
//! bracket blocks inside values and preludes are consumed as soon as they
//! open, and item text is recovered by slicing the input between token
//! positions.

use core::mem::take;
use std::path::Path;

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};
use log::trace;

use crate::{
    AtRule, BlockRaws, Comment, Declaration, DeclarationRaws, Node, OtherNode, StyleRule,
    Stylesheet, split_important_tail,
};

/// Children of one container plus the raws that belong to the container.
#[derive(Default)]
struct Body {
    nodes: Vec<Node>,
    after: String,
    semicolon: bool,
}

/// Coarse classification of the next token.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    Whitespace,
    Comment,
    Semicolon,
    AtKeyword,
    Colon,
    Block,
    /// A function, `(` or `[` block whose contents are still unread.
    Nested,
    Other,
    End,
}

/// How an item (declaration, rule, at-rule prelude) ended.
#[derive(Clone, Copy)]
enum Terminator {
    /// A `;` starting at the given position.
    Semicolon(SourcePosition),
    /// A `{` starting at the given position; the block is not consumed yet.
    Block(SourcePosition),
    /// End of the input or of the enclosing block.
    End(SourcePosition),
}

struct Scan {
    /// Position of the first top-level `:` in the item.
    colon: Option<SourcePosition>,
    end: Terminator,
}

/// Parse a full stylesheet into a lossless `Stylesheet`.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let body = parse_body(&mut parser);
    trace!("parsed stylesheet with {} top-level nodes", body.nodes.len());
    Stylesheet {
        nodes: body.nodes,
        after: body.after,
        semicolon: body.semicolon,
        source: None,
    }
}

/// Parse a stylesheet and remember the file it came from.
pub fn parse_stylesheet_from(css: &str, source: Option<&Path>) -> Stylesheet {
    let mut sheet = parse_stylesheet(css);
    sheet.source = source.map(Path::to_path_buf);
    sheet
}

fn next_step(input: &mut Parser<'_, '_>) -> Step {
    match input.next_including_whitespace_and_comments() {
        Ok(Token::WhiteSpace(_)) => Step::Whitespace,
        Ok(Token::Comment(_)) => Step::Comment,
        Ok(Token::Semicolon) => Step::Semicolon,
        Ok(Token::AtKeyword(_)) => Step::AtKeyword,
        Ok(Token::Colon) => Step::Colon,
        Ok(Token::CurlyBracketBlock) => Step::Block,
        Ok(Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock) => Step::Nested,
        Ok(_) => Step::Other,
        Err(_) => Step::End,
    }
}

/// Consume the block whose opening token was just returned, so that the next
/// `position()` lies after its closing token.
fn skip_nested_block<'i>(input: &mut Parser<'i, '_>) {
    input
        .parse_nested_block(|_nested| Ok::<(), ParseError<'i, ()>>(()))
        .unwrap_or_default();
}

/// Consume tokens up to the end of the current item.
fn scan_item(input: &mut Parser<'_, '_>) -> Scan {
    let mut colon = None;
    loop {
        let position = input.position();
        match next_step(input) {
            Step::End => {
                return Scan {
                    colon,
                    end: Terminator::End(position),
                };
            }
            Step::Semicolon => {
                return Scan {
                    colon,
                    end: Terminator::Semicolon(position),
                };
            }
            Step::Block => {
                return Scan {
                    colon,
                    end: Terminator::Block(position),
                };
            }
            Step::Colon => {
                if colon.is_none() {
                    colon = Some(position);
                }
            }
            Step::Nested => skip_nested_block(input),
            Step::Whitespace | Step::Comment | Step::AtKeyword | Step::Other => {}
        }
    }
}

/// Parse the children of a stylesheet or of a `{}` block.
fn parse_body(input: &mut Parser<'_, '_>) -> Body {
    let mut body = Body::default();
    let mut pending = String::new();
    loop {
        let start = input.position();
        let state = input.state();
        match next_step(input) {
            Step::End => break,
            Step::Whitespace | Step::Semicolon => pending.push_str(input.slice_from(start)),
            Step::Comment => body.nodes.push(Node::Comment(Comment {
                text: input.slice_from(start).to_owned(),
                before: take(&mut pending),
            })),
            Step::AtKeyword => {
                let name = input.slice_from(start).get(1..).unwrap_or_default().to_owned();
                let before = take(&mut pending);
                read_at_rule(input, name, before, &mut body, &mut pending);
            }
            Step::Colon | Step::Block | Step::Nested | Step::Other => {
                input.reset(&state);
                let before = take(&mut pending);
                read_item(input, before, &mut body, &mut pending);
            }
        }
    }
    body.after = pending;
    body
}

/// Parse the contents of the block whose `{` was just returned by the tokenizer.
fn parse_block<'i>(input: &mut Parser<'i, '_>) -> Body {
    input
        .parse_nested_block(|nested| Ok::<Body, ParseError<'i, ()>>(parse_body(nested)))
        .unwrap_or_default()
}

/// Split trailing whitespace off `text`.
fn split_trailing_whitespace(text: &str) -> (&str, &str) {
    let trimmed = text.trim_end();
    text.split_at(trimmed.len())
}

/// Split leading whitespace off `text`, returning (`whitespace`, `rest`).
fn split_leading_whitespace(text: &str) -> (&str, &str) {
    let rest = text.trim_start();
    text.split_at(text.len() - rest.len())
}

/// Read a style rule, a declaration, or an unparsed item.
fn read_item(input: &mut Parser<'_, '_>, before: String, body: &mut Body, pending: &mut String) {
    let start = input.position();
    let scan = scan_item(input);
    let (end, terminated) = match scan.end {
        Terminator::Block(brace) => {
            let (selector, between) = split_trailing_whitespace(input.slice(start..brace));
            let (selector, between) = (selector.to_owned(), between.to_owned());
            let inner = parse_block(input);
            body.nodes.push(Node::Rule(StyleRule {
                selector,
                nodes: inner.nodes,
                raws: BlockRaws {
                    before,
                    between,
                    after: inner.after,
                    semicolon: inner.semicolon,
                },
            }));
            return;
        }
        Terminator::Semicolon(end) => (end, true),
        Terminator::End(end) => (end, false),
    };

    let (text, trailing) = split_trailing_whitespace(input.slice(start..end));
    let trailing = if terminated {
        trailing.to_owned()
    } else {
        pending.push_str(trailing);
        String::new()
    };
    let node = match scan.colon {
        Some(colon) => {
            let colon_offset = input.slice(start..colon).len();
            Node::Declaration(declaration_from(text, colon_offset, before, trailing))
        }
        None => Node::Other(OtherNode {
            text: [text, trailing.as_str()].concat(),
            before,
            terminated,
        }),
    };
    body.semicolon = terminated;
    body.nodes.push(node);
}

/// Build a declaration from its source text; `colon_offset` indexes the first `:`.
fn declaration_from(text: &str, colon_offset: usize, before: String, trailing: String) -> Declaration {
    let (name_part, rest) = text.split_at(colon_offset);
    let (property, name_gap) = split_trailing_whitespace(name_part);
    let after_colon = rest.get(1..).unwrap_or_default();
    let (value_gap, value_text) = split_leading_whitespace(after_colon);
    let (value, important) = split_important_tail(value_text);
    Declaration {
        property: property.to_owned(),
        value: value.to_owned(),
        important: !important.is_empty(),
        raws: DeclarationRaws {
            before,
            between: [name_gap, ":", value_gap].concat(),
            important: important.to_owned(),
            trailing,
        },
    }
}

/// Read an at-rule whose `@name` token has just been consumed.
fn read_at_rule(
    input: &mut Parser<'_, '_>,
    name: String,
    before: String,
    body: &mut Body,
    pending: &mut String,
) {
    let start = input.position();
    let scan = scan_item(input);
    let end = match scan.end {
        Terminator::Semicolon(end) | Terminator::Block(end) | Terminator::End(end) => end,
    };
    let (after_name, prelude) = split_leading_whitespace(input.slice(start..end));
    let (params, between) = split_trailing_whitespace(prelude);
    let mut at_rule = AtRule {
        name,
        params: params.to_owned(),
        nodes: None,
        after_name: after_name.to_owned(),
        raws: BlockRaws {
            before,
            between: between.to_owned(),
            after: String::new(),
            semicolon: false,
        },
    };
    match scan.end {
        Terminator::Block(_) => {
            let inner = parse_block(input);
            at_rule.nodes = Some(inner.nodes);
            at_rule.raws.after = inner.after;
            at_rule.raws.semicolon = inner.semicolon;
        }
        Terminator::Semicolon(_) => body.semicolon = true,
        Terminator::End(_) => {
            pending.push_str(&at_rule.raws.between);
            at_rule.raws.between.clear();
            body.semicolon = false;
        }
    }
    body.nodes.push(Node::AtRule(at_rule));
}

#[cfg(test)]
mod tests {
    use super::{split_leading_whitespace, split_trailing_whitespace};

    #[test]
    fn whitespace_splits() {
        assert_eq!(split_trailing_whitespace("a b \n"), ("a b", " \n"));
        assert_eq!(split_leading_whitespace("  a b"), ("  ", "a b"));
        assert_eq!(split_leading_whitespace(""), ("", ""));
    }
}
