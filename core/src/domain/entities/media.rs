//! Value types embedded in content entities

use serde::{Deserialize, Serialize};

/// Resolved image asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public CDN URL of the asset
    pub url: String,

    /// Alternative text
    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageRef {
    /// Alt text, or the given fallback when the editor left it blank
    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.alt.as_deref() {
            Some(alt) if !alt.trim().is_empty() => alt,
            _ => fallback,
        }
    }
}

/// Dereferenced category as embedded in products and articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}
