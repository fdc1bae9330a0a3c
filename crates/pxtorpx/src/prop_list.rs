//! Property blacklist matching.
//!
//! A blacklist entry is one of `name` (exact), `*name*` (contains), `name*`
//! (starts with), `*name` (ends with) or a bare `*`, and may be negated with a
//! leading `!`. Negated entries carve exceptions out of the positive ones.

/// Blacklist entries sorted into buckets by shape and negation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropList {
    pub exact: Vec<String>,
    pub contain: Vec<String>,
    pub start_with: Vec<String>,
    pub end_with: Vec<String>,
    pub not_exact: Vec<String>,
    pub not_contain: Vec<String>,
    pub not_start_with: Vec<String>,
    pub not_end_with: Vec<String>,
}

const fn is_plain(character: char) -> bool {
    character != '*' && character != '!'
}

/// `name`: no wildcard and no negation anywhere.
fn exact(entry: &str) -> Option<&str> {
    (!entry.is_empty() && entry.chars().all(is_plain)).then_some(entry)
}

/// `*name*`: anything non-empty between two wildcards.
fn contain(entry: &str) -> Option<&str> {
    entry
        .strip_prefix('*')?
        .strip_suffix('*')
        .filter(|inner| !inner.is_empty())
}

/// `name*`: a plain prefix followed by one wildcard.
fn start_with(entry: &str) -> Option<&str> {
    entry.strip_suffix('*').and_then(exact)
}

/// `*name`: one wildcard followed by a suffix without wildcards.
fn end_with(entry: &str) -> Option<&str> {
    entry
        .strip_prefix('*')
        .filter(|rest| !rest.is_empty() && !rest.contains('*'))
}

/// `!name`: negation not followed by a wildcard.
fn not_exact(entry: &str) -> Option<&str> {
    entry
        .strip_prefix('!')
        .filter(|rest| rest.chars().next().is_some_and(|first| first != '*'))
}

/// `!*name*`
fn not_contain(entry: &str) -> Option<&str> {
    entry.strip_prefix('!').and_then(contain)
}

/// `!name*`
fn not_start_with(entry: &str) -> Option<&str> {
    entry
        .strip_prefix('!')?
        .strip_suffix('*')
        .filter(|inner| !inner.is_empty() && !inner.contains('*'))
}

/// `!*name`
fn not_end_with(entry: &str) -> Option<&str> {
    entry.strip_prefix('!').and_then(end_with)
}

fn bucket<S: AsRef<str>>(entries: &[S], shape: fn(&str) -> Option<&str>) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| shape(entry.as_ref()))
        .map(str::to_owned)
        .collect()
}

impl PropList {
    /// Sort blacklist entries into buckets. Entries that fit no shape (such as
    /// a bare `*`) land in no bucket.
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        Self {
            exact: bucket(entries, exact),
            contain: bucket(entries, contain),
            start_with: bucket(entries, start_with),
            end_with: bucket(entries, end_with),
            not_exact: bucket(entries, not_exact),
            not_contain: bucket(entries, not_contain),
            not_start_with: bucket(entries, not_start_with),
            not_end_with: bucket(entries, not_end_with),
        }
    }
}

fn matches_shapes(
    prop: &str,
    exact_names: &[String],
    contained: &[String],
    prefixes: &[String],
    suffixes: &[String],
) -> bool {
    exact_names.iter().any(|name| name == prop)
        || contained.iter().any(|part| prop.contains(part.as_str()))
        || prefixes.iter().any(|prefix| prop.starts_with(prefix.as_str()))
        || suffixes.iter().any(|suffix| prop.ends_with(suffix.as_str()))
}

/// Decides which properties the blacklist keeps away from conversion.
#[derive(Clone, Debug, Default)]
pub struct PropListMatcher {
    /// The list is exactly `["*"]`.
    match_all: bool,
    /// The list contains a bare `*` among other entries.
    has_wild: bool,
    lists: PropList,
}

impl PropListMatcher {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let has_wild = entries.iter().any(|entry| entry.as_ref() == "*");
        Self {
            match_all: has_wild && entries.len() == 1,
            has_wild,
            lists: PropList::new(entries),
        }
    }

    /// Whether `prop` is blacklisted and must be skipped. An empty blacklist
    /// skips nothing.
    pub fn should_skip(&self, prop: &str) -> bool {
        if self.match_all {
            return true;
        }
        let lists = &self.lists;
        let listed = self.has_wild
            || matches_shapes(
                prop,
                &lists.exact,
                &lists.contain,
                &lists.start_with,
                &lists.end_with,
            );
        listed
            && !matches_shapes(
                prop,
                &lists.not_exact,
                &lists.not_contain,
                &lists.not_start_with,
                &lists.not_end_with,
            )
    }
}
