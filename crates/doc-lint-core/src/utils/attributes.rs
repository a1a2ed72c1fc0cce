//! Attribute matching utilities for rule implementations.
//!
//! Attributes arrive as written by the front end, e.g. `@_spi(Experimental)`.
//! Matching ignores the leading `@`, the argument list, and ASCII case.

use std::collections::BTreeSet;

/// Returns the bare name of an attribute.
///
/// # Examples
///
/// ```
/// use doc_lint_core::utils::attribute_name;
///
/// assert_eq!(attribute_name("@_spi(Experimental)"), "_spi");
/// assert_eq!(attribute_name("available"), "available");
/// ```
#[must_use]
pub fn attribute_name(attribute: &str) -> &str {
    let trimmed = attribute.trim();
    let trimmed = trimmed.strip_prefix('@').unwrap_or(trimmed);
    trimmed
        .split_once('(')
        .map_or(trimmed, |(name, _)| name)
        .trim_end()
}

/// Checks if any attribute's bare name matches one of `names`.
#[must_use]
pub fn has_attribute(attributes: &BTreeSet<String>, names: &[&str]) -> bool {
    attributes.iter().any(|attr| {
        let name = attribute_name(attr);
        names.iter().any(|n| name.eq_ignore_ascii_case(n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_attribute_name_strips_decorations() {
        assert_eq!(attribute_name("@_spi"), "_spi");
        assert_eq!(attribute_name(" @_spi (Internal) "), "_spi");
        assert_eq!(attribute_name("objc"), "objc");
        assert_eq!(attribute_name(""), "");
    }

    #[test]
    fn test_has_attribute_is_case_insensitive() {
        assert!(has_attribute(&attrs(&["@_SPI(Foo)"]), &["_spi"]));
        assert!(has_attribute(&attrs(&["inlinable", "spi"]), &["_spi", "spi"]));
        assert!(!has_attribute(&attrs(&["@spiral"]), &["spi"]));
        assert!(!has_attribute(&BTreeSet::new(), &["spi"]));
    }
}
