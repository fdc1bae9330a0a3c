//! The px → rpx pass over a stylesheet tree.

use std::borrow::Cow;
use std::path::Path;

use css_syntax::{AtRule, Declaration, Node, Stylesheet, declarations_in, parse_stylesheet_from};
use css_values_units::{PxFormatter, contains_px, replace_px_tokens};
use log::{debug, trace};

use crate::options::Options;
use crate::prop_list::PropListMatcher;
use crate::selector_filter::is_blacklisted;

/// What a run should do with one declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclarationEdit {
    /// Overwrite the value in place.
    Replace(String),
    /// Keep the original and add a copy with this value right after it.
    InsertAfter(String),
}

/// Counts reported by [`PxToRpx::process`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// The stylesheet's file matched `exclude` and nothing was touched.
    pub excluded: bool,
    /// Declarations whose value was overwritten.
    pub replaced: usize,
    /// Converted copies inserted after their original.
    pub inserted: usize,
    /// `@media` params rewritten.
    pub media_queries: usize,
}

/// Converts pixel lengths in stylesheets according to one set of [`Options`].
///
/// The plugin holds no per-run state, so a shared reference can process any
/// number of stylesheets, on any number of threads.
#[derive(Clone, Debug)]
pub struct PxToRpx {
    options: Options,
    props: PropListMatcher,
}

impl Default for PxToRpx {
    #[inline]
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Whether a sibling already declares `property` with exactly `value`.
fn declaration_exists(siblings: &[Node], property: &str, value: &str) -> bool {
    declarations_in(siblings).any(|decl| decl.property == property && decl.value == value)
}

impl PxToRpx {
    #[inline]
    #[must_use]
    pub fn new(options: Options) -> Self {
        let props = PropListMatcher::new(&options.prop_blacklist);
        Self { options, props }
    }

    fn formatter(&self) -> PxFormatter<'_> {
        PxFormatter {
            unit: &self.options.unit,
            precision: self.options.unit_precision,
            min_pixel_value: self.options.min_pixel_value,
            transform: self.options.transform.as_fn(),
        }
    }

    /// Rewrite every convertible pixel token in `text`.
    #[inline]
    pub fn convert<'text>(&self, text: &'text str) -> Cow<'text, str> {
        let formatter = self.formatter();
        replace_px_tokens(text, |token| formatter.format(token))
    }

    /// Whether a stylesheet read from `path` is left alone. Stylesheets
    /// without a known file are never excluded.
    #[inline]
    pub fn is_excluded(&self, path: Option<&Path>) -> bool {
        match (&self.options.exclude, path) {
            (Some(exclude), Some(file)) => exclude.matches(file),
            _ => false,
        }
    }

    /// Decide what to do with `decl`, given the selector of the rule that owns
    /// it and the nodes it sits among (itself included).
    pub fn declaration_edit(
        &self,
        decl: &Declaration,
        selector: Option<&str>,
        siblings: &[Node],
    ) -> Option<DeclarationEdit> {
        if !contains_px(&decl.value) {
            return None;
        }
        if self.props.should_skip(&decl.property) {
            trace!("skipping blacklisted property {}", decl.property);
            return None;
        }
        if is_blacklisted(&self.options.selector_blacklist, selector) {
            trace!(
                "skipping {} in blacklisted selector {}",
                decl.property,
                selector.unwrap_or_default()
            );
            return None;
        }
        let value = self.convert(&decl.value);
        if declaration_exists(siblings, &decl.property, &value) {
            trace!("{}: {} is already declared", decl.property, value);
            return None;
        }
        let value = value.into_owned();
        Some(if self.options.replace {
            DeclarationEdit::Replace(value)
        } else {
            DeclarationEdit::InsertAfter(value)
        })
    }

    /// New params for an `@media` rule, when media queries are converted and
    /// the params contain something to convert.
    pub fn media_params_edit(&self, rule: &AtRule) -> Option<String> {
        if !self.options.media_query
            || !rule.name.eq_ignore_ascii_case("media")
            || !contains_px(&rule.params)
        {
            return None;
        }
        match self.convert(&rule.params) {
            Cow::Owned(params) if params != rule.params => Some(params),
            Cow::Owned(_) | Cow::Borrowed(_) => None,
        }
    }

    /// Run the pass over `sheet` in document order.
    pub fn process(&self, sheet: &mut Stylesheet) -> RunSummary {
        let mut summary = RunSummary::default();
        if self.is_excluded(sheet.source()) {
            if let Some(path) = sheet.source() {
                debug!("excluded {}", path.display());
            }
            summary.excluded = true;
            return summary;
        }
        self.walk(&mut sheet.nodes, None, &mut summary);
        debug!(
            "px conversion done: {} replaced, {} inserted, {} media queries",
            summary.replaced, summary.inserted, summary.media_queries
        );
        summary
    }

    fn walk(&self, nodes: &mut Vec<Node>, selector: Option<&str>, summary: &mut RunSummary) {
        let mut index = 0;
        while index < nodes.len() {
            let edit = match nodes.get(index) {
                Some(Node::Declaration(decl)) => self.declaration_edit(decl, selector, nodes.as_slice()),
                _ => None,
            };
            match edit {
                Some(DeclarationEdit::Replace(value)) => {
                    if let Some(Node::Declaration(decl)) = nodes.get_mut(index) {
                        debug!("{}: {} -> {}", decl.property, decl.value, value);
                        decl.value = value;
                        summary.replaced += 1;
                    }
                }
                Some(DeclarationEdit::InsertAfter(value)) => {
                    let copy = match nodes.get(index) {
                        Some(Node::Declaration(decl)) => Some(decl.cloned_with_value(&value)),
                        _ => None,
                    };
                    if let Some(copy) = copy {
                        debug!("{}: appended {}", copy.property, copy.value);
                        index += 1;
                        nodes.insert(index, Node::Declaration(copy));
                        summary.inserted += 1;
                    }
                }
                None => {}
            }
            match nodes.get_mut(index) {
                Some(Node::Rule(rule)) => self.walk(&mut rule.nodes, Some(&rule.selector), summary),
                Some(Node::AtRule(rule)) => {
                    if let Some(params) = self.media_params_edit(rule) {
                        debug!("@{} {} -> {}", rule.name, rule.params, params);
                        rule.params = params;
                        summary.media_queries += 1;
                    }
                    if let Some(children) = rule.nodes.as_mut() {
                        self.walk(children, None, summary);
                    }
                }
                _ => {}
            }
            index += 1;
        }
    }

    /// Parse `css`, run the pass and serialize the result. `path` is the file
    /// the text came from and only feeds the `exclude` check.
    pub fn process_css(&self, css: &str, path: Option<&Path>) -> String {
        let mut sheet = parse_stylesheet_from(css, path);
        self.process(&mut sheet);
        sheet.to_css()
    }
}
