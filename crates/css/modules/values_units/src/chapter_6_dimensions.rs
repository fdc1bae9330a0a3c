//! CSS Values & Units Level 3 — §6 Dimensions (pixel lengths)
//! See <https://www.w3.org/TR/css-values-3/#lengths>
//!
//! Pixel tokens are located with the `cssparser` tokenizer rather than by
//! pattern matching on raw text, which gives the exclusions for free:
//! quoted strings are `QuotedString` tokens, `url(...)` arguments are never
//! entered, and a name such as `--rpx-14px` is a single `Ident`. Only a
//! `Dimension` whose unit is exactly `px` qualifies; `PX` and `Px` do not.

use std::borrow::Cow;

use cssparser::{ParseError, Parser, ParserInput, Token};

/// A pixel length found in a value, e.g. `-0.5px`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PxToken<'text> {
    /// The full matched text including sign and unit.
    pub text: &'text str,
    /// The numeric part including its sign, e.g. `-0.5` or `.5`.
    pub number: &'text str,
}

/// Byte range of a pixel token within the scanned text.
type Span = (usize, usize);

enum Scanned {
    Px,
    /// A block to search for more tokens.
    Nested,
    /// A block to step over unread, such as the argument of `url(`.
    Opaque,
    Skip,
    End,
}

/// Cheap pre-check: whether the literal `px` occurs anywhere in `text`.
#[inline]
pub fn contains_px(text: &str) -> bool {
    text.contains("px")
}

/// Walk the tokens of `input`, recording pixel dimensions and descending into
/// every block except `url(`.
fn collect_px_spans(input: &mut Parser<'_, '_>, spans: &mut Vec<Span>) {
    loop {
        let start = input.position();
        let scanned = match input.next_including_whitespace_and_comments() {
            Ok(Token::Dimension { unit, .. }) if &**unit == "px" => Scanned::Px,
            Ok(Token::Function(name)) if name.eq_ignore_ascii_case("url") => Scanned::Opaque,
            Ok(
                Token::Function(_)
                | Token::ParenthesisBlock
                | Token::SquareBracketBlock
                | Token::CurlyBracketBlock,
            ) => Scanned::Nested,
            Ok(_) => Scanned::Skip,
            Err(_) => Scanned::End,
        };
        match scanned {
            Scanned::End => return,
            Scanned::Px => spans.push((start.byte_index(), input.position().byte_index())),
            Scanned::Nested => input
                .parse_nested_block(|nested| {
                    collect_px_spans(nested, spans);
                    Ok::<(), ParseError<'_, ()>>(())
                })
                .unwrap_or_default(),
            Scanned::Opaque => input
                .parse_nested_block(|_nested| Ok::<(), ParseError<'_, ()>>(()))
                .unwrap_or_default(),
            Scanned::Skip => {}
        }
    }
}

fn px_spans(text: &str) -> Vec<Span> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut spans = Vec::new();
    collect_px_spans(&mut parser, &mut spans);
    spans
}

fn token_at(text: &str, (start, end): Span) -> Option<PxToken<'_>> {
    let token_text = text.get(start..end)?;
    let number = token_text.strip_suffix("px")?;
    Some(PxToken {
        text: token_text,
        number,
    })
}

/// Replace every convertible pixel token in `text` with `replace(token)`.
///
/// Text outside the tokens is copied byte for byte; when no token is found
/// the input is returned borrowed.
pub fn replace_px_tokens<F>(text: &str, mut replace: F) -> Cow<'_, str>
where
    F: FnMut(PxToken<'_>) -> String,
{
    if !contains_px(text) {
        return Cow::Borrowed(text);
    }
    let spans = px_spans(text);
    if spans.is_empty() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for span in spans {
        let Some(token) = token_at(text, span) else {
            continue;
        };
        out.push_str(text.get(copied..span.0).unwrap_or_default());
        out.push_str(&replace(token));
        copied = span.1;
    }
    out.push_str(text.get(copied..).unwrap_or_default());
    Cow::Owned(out)
}
