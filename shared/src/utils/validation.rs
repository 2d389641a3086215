//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase ASCII words separated by single hyphens
static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// Maximum slug length accepted in URLs
pub const MAX_SLUG_LENGTH: usize = 200;

/// Check whether a URL segment can be a content slug.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= MAX_SLUG_LENGTH && SLUG_REGEX.is_match(slug)
}

/// Trim an optional form value, treating blank input as absent.
pub fn non_empty_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
