//! Locale resolution for inbound requests.
//!
//! - `negotiation` picks a supported locale from `Accept-Language`
//! - `routing` decides whether a path proceeds, bypasses locale handling or
//!   is redirected to its locale-prefixed form

pub mod negotiation;
pub mod routing;

pub use negotiation::{negotiate, negotiate_header, parse_accept_language, LanguagePreference};
pub use routing::{
    decide_route, is_reserved_path, locale_from_path, localized_path, strip_locale, RouteDecision,
};
