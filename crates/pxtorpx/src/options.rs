//! Options accepted by the px → rpx pass.
//!
//! Options can be built in code (`Options { replace: false, ..Options::default() }`)
//! or read from the JSON object form, e.g.
//! `{ "unit": "rem", "propBlackList": ["font*"], "exclude": { "regex": "(?i)vendor" } }`.

use core::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use regex::Regex;
use serde::Deserialize;

/// A selector or file-path pattern.
///
/// In JSON a plain string is a [`Pattern::Literal`] and `{ "regex": "..." }`
/// is a [`Pattern::Regex`]. Regexes are compiled while the options are read.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "RawPattern")]
pub enum Pattern {
    /// Matches when the text contains this substring.
    Literal(String),
    /// Matches when the regex finds a match anywhere in the text.
    Regex(Regex),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Literal(String),
    Regex { regex: String },
}

impl TryFrom<RawPattern> for Pattern {
    type Error = regex::Error;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        match raw {
            RawPattern::Literal(text) => Ok(Self::Literal(text)),
            RawPattern::Regex { regex } => Regex::new(&regex).map(Self::Regex),
        }
    }
}

impl Pattern {
    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Literal(needle) => haystack.contains(needle.as_str()),
            Self::Regex(regex) => regex.is_match(haystack),
        }
    }
}

impl From<&str> for Pattern {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Literal(text.to_owned())
    }
}

impl From<Regex> for Pattern {
    #[inline]
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

/// Predicate deciding whether a stylesheet file is skipped.
pub type ExcludeFn = dyn Fn(&Path) -> bool + Send + Sync;

/// Which stylesheet files are left untouched.
#[derive(Clone, Deserialize)]
#[serde(from = "Pattern")]
pub enum Exclude {
    /// Skip files whose path matches the pattern.
    Pattern(Pattern),
    /// Skip files for which the predicate returns true.
    Predicate(Arc<ExcludeFn>),
}

impl Exclude {
    /// Exclude files for which `predicate` returns true.
    #[inline]
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    /// Whether the file at `path` is excluded.
    #[inline]
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Pattern(pattern) => pattern.is_match(&path.to_string_lossy()),
            Self::Predicate(predicate) => predicate(path),
        }
    }
}

impl From<Pattern> for Exclude {
    #[inline]
    fn from(pattern: Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

impl fmt::Debug for Exclude {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => formatter.debug_tuple("Pattern").field(pattern).finish(),
            Self::Predicate(_) => formatter.write_str("Predicate(..)"),
        }
    }
}

/// Maps a pixel value to the number written in the output unit.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl Transform {
    #[inline]
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(transform))
    }

    #[inline]
    pub fn apply(&self, pixels: f64) -> f64 {
        (self.0)(pixels)
    }

    /// Borrow the wrapped function.
    #[inline]
    pub fn as_fn(&self) -> &(dyn Fn(f64) -> f64 + Send + Sync) {
        &*self.0
    }
}

impl Default for Transform {
    /// Designs are drawn at twice the device width, so 1px becomes 2rpx.
    fn default() -> Self {
        Self::new(|pixels| pixels * 2.0)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Transform(..)")
    }
}

/// Configuration for one [`PxToRpx`](crate::PxToRpx) instance.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Unit written after converted numbers.
    pub unit: String,
    /// Decimal places kept after conversion.
    pub unit_precision: u32,
    /// Rules whose selector matches any of these are left alone.
    #[serde(rename = "selectorBlackList")]
    pub selector_blacklist: Vec<Pattern>,
    /// Property patterns that are not converted: `margin`, `*pad*`,
    /// `font*`, `*-right`, `*`, each optionally negated with a leading `!`.
    #[serde(rename = "propBlackList")]
    pub prop_blacklist: Vec<String>,
    /// Overwrite values in place instead of appending a converted fallback.
    pub replace: bool,
    /// Also convert the params of `@media` rules.
    pub media_query: bool,
    /// Pixel values below this are not converted.
    pub min_pixel_value: f64,
    /// Files to leave untouched.
    pub exclude: Option<Exclude>,
    #[serde(skip)]
    pub transform: Transform,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unit: "rpx".to_owned(),
            unit_precision: 5,
            selector_blacklist: Vec::new(),
            prop_blacklist: Vec::new(),
            replace: true,
            media_query: false,
            min_pixel_value: 0.0,
            exclude: None,
            transform: Transform::default(),
        }
    }
}

impl Options {
    /// Read options from their JSON object form. Missing keys keep their
    /// defaults; `transform` always keeps its default.
    ///
    /// # Errors
    /// Returns an error when the JSON is malformed, a field has the wrong
    /// type, or a `{ "regex": ... }` pattern does not compile.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid pxtorpx options")
    }
}

#[cfg(test)]
mod tests {
    use super::{Exclude, Options, Pattern, Transform};
    use regex::Regex;
    use std::path::Path;

    #[test]
    fn defaults_match_documented_values() {
        let options = Options::default();
        assert_eq!(options.unit, "rpx");
        assert_eq!(options.unit_precision, 5);
        assert!(options.replace);
        assert!(!options.media_query);
        assert_eq!(options.min_pixel_value, 0.0);
        assert!(options.exclude.is_none());
        assert_eq!(options.transform.apply(16.0), 32.0);
    }

    #[test]
    fn literal_and_regex_patterns() {
        assert!(Pattern::from("body$").is_match(".class-body$"));
        assert!(!Pattern::from("body$").is_match("body"));
        let anchored = Pattern::from(Regex::new("^body$").unwrap());
        assert!(anchored.is_match("body"));
        assert!(!anchored.is_match(".class-body"));
    }

    #[test]
    fn exclude_variants() {
        let path = Path::new("exclude/path");
        assert!(Exclude::from(Pattern::from("exclude")).matches(path));
        assert!(Exclude::from(Pattern::from(Regex::new("(?i)EXCLUDE").unwrap())).matches(path));
        assert!(Exclude::predicate(|file| file.starts_with("exclude")).matches(path));
        assert!(!Exclude::from(Pattern::from("vendor")).matches(path));
    }

    #[test]
    fn custom_transform() {
        let identity = Transform::new(|pixels| pixels);
        assert_eq!(identity.apply(3.5), 3.5);
    }
}
