//! Page templates served under a locale prefix

use serde::{Deserialize, Serialize};

/// Identifies which page to compose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum PageTemplate {
    Home,
    About,
    /// Catalog, optionally narrowed to one category slug
    Products { category: Option<String> },
    ProductDetail { slug: String },
    Blog,
    ArticleDetail { slug: String },
    Contact,
}

impl PageTemplate {
    /// Dictionary namespace holding the page's strings
    pub fn namespace(&self) -> &'static str {
        match self {
            PageTemplate::Home => "home",
            PageTemplate::About => "about",
            PageTemplate::Products { .. } | PageTemplate::ProductDetail { .. } => "products",
            PageTemplate::Blog | PageTemplate::ArticleDetail { .. } => "blog",
            PageTemplate::Contact => "contact",
        }
    }

    /// Path below the locale prefix, e.g. `/products/arabica`
    pub fn path(&self) -> String {
        match self {
            PageTemplate::Home => "/".to_string(),
            PageTemplate::About => "/about".to_string(),
            PageTemplate::Products { category: None } => "/products".to_string(),
            PageTemplate::Products {
                category: Some(category),
            } => format!("/products?category={}", category),
            PageTemplate::ProductDetail { slug } => format!("/products/{}", slug),
            PageTemplate::Blog => "/blog".to_string(),
            PageTemplate::ArticleDetail { slug } => format!("/blog/{}", slug),
            PageTemplate::Contact => "/contact".to_string(),
        }
    }

    /// Whether the page cannot render without a single looked-up entity
    pub fn requires_entity(&self) -> bool {
        matches!(
            self,
            PageTemplate::ProductDetail { .. } | PageTemplate::ArticleDetail { .. }
        )
    }
}
