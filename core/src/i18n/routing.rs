//! Locale prefix handling for request paths

use agro_shared::Locale;
use once_cell::sync::Lazy;
use regex::Regex;

use super::negotiation::negotiate_header;

/// Paths that never carry a locale: API routes, build assets, well-known
/// root files and anything that looks like a file.
static RESERVED_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^/(?:api|_next|static|assets|\.well-known)(?:/|$)",
        r"|^/(?:favicon\.ico|robots\.txt|sitemap\.xml|manifest\.webmanifest)$",
        r"|/[^/]*\.[A-Za-z0-9]+$",
    ))
    .expect("reserved path pattern is valid")
});

/// What to do with an inbound request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Reserved path; locale handling does not apply
    Bypass,
    /// Path already carries a supported locale prefix
    Proceed { locale: Locale },
    /// Path lacks a prefix; redirect to the localized location
    Redirect { location: String, locale: Locale },
}

pub fn is_reserved_path(path: &str) -> bool {
    RESERVED_PATH.is_match(path)
}

/// Locale named by the first path segment, if it is a supported tag
pub fn locale_from_path(path: &str) -> Option<Locale> {
    let first = path.trim_start_matches('/').split('/').next()?;
    Locale::from_tag(first)
}

/// Remove the locale prefix: `/id/about` becomes `/about`, `/id` becomes `/`
pub fn strip_locale(path: &str) -> &str {
    match locale_from_path(path) {
        Some(locale) => {
            let rest = &path.trim_start_matches('/')[locale.code().len()..];
            if rest.is_empty() {
                "/"
            } else {
                rest
            }
        }
        None => path,
    }
}

/// Prefix a locale-less path: `/about` becomes `/id/about`, `/` becomes `/id`
pub fn localized_path(locale: Locale, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("/{}", locale.code())
    } else {
        format!("/{}/{}", locale.code(), path)
    }
}

/// Decide how to route a request.
///
/// Reserved paths are matched before any negotiation happens. The query
/// string, when present, is carried over to the redirect target.
pub fn decide_route(path: &str, query: Option<&str>, accept_language: Option<&str>) -> RouteDecision {
    if is_reserved_path(path) {
        return RouteDecision::Bypass;
    }
    if let Some(locale) = locale_from_path(path) {
        return RouteDecision::Proceed { locale };
    }

    let locale = negotiate_header(accept_language);
    let mut location = localized_path(locale, path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        location.push('?');
        location.push_str(query);
    }
    RouteDecision::Redirect { location, locale }
}
