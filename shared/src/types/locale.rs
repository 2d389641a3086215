//! Supported locales of the site

use serde::{Deserialize, Serialize};

/// A locale the site is published in.
///
/// The set is fixed at build time. English is the default: it is the
/// fallback for negotiation, routing and dictionary lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "id")]
    Indonesian,
}

/// Every supported locale, default first.
pub const SUPPORTED_LOCALES: [Locale; 2] = [Locale::English, Locale::Indonesian];

impl Default for Locale {
    fn default() -> Self {
        Locale::DEFAULT
    }
}

impl Locale {
    /// The locale used when nothing better can be negotiated
    pub const DEFAULT: Locale = Locale::English;

    /// All supported locales
    pub fn all() -> &'static [Locale] {
        &SUPPORTED_LOCALES
    }

    /// Tag used in URLs and `lang` attributes (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Indonesian => "id",
        }
    }

    /// Whether this is the default locale
    pub fn is_default(&self) -> bool {
        *self == Locale::DEFAULT
    }

    /// Get language name in English
    pub fn name(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Indonesian => "Indonesian",
        }
    }

    /// Get native language name
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Indonesian => "Bahasa Indonesia",
        }
    }

    /// Region-qualified form used by Open Graph metadata
    pub fn og_locale(&self) -> &'static str {
        match self {
            Locale::English => "en_US",
            Locale::Indonesian => "id_ID",
        }
    }

    /// Exact tag lookup, as used for URL prefixes
    pub fn from_tag(tag: &str) -> Option<Self> {
        SUPPORTED_LOCALES.iter().copied().find(|locale| locale.code() == tag)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "id" | "indonesian" | "bahasa" => Ok(Locale::Indonesian),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}
