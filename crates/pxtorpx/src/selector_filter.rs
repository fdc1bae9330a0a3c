use crate::options::Pattern;

/// Whether `selector` matches any blacklist pattern. Declarations outside a
/// style rule have no selector and are never blacklisted.
#[inline]
pub fn is_blacklisted(blacklist: &[Pattern], selector: Option<&str>) -> bool {
    selector.is_some_and(|selector| blacklist.iter().any(|pattern| pattern.is_match(selector)))
}
