//! Data fetched for a page before composition

use crate::domain::entities::{Article, Category, Product};

use super::template::PageTemplate;

/// Fetched entities, shaped per template.
///
/// `Option` fields are required single-entity lookups; `Vec` fields are
/// supplementary listings that may legitimately be empty.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Home {
        featured_products: Vec<Product>,
        latest_articles: Vec<Article>,
    },
    About,
    Products {
        products: Vec<Product>,
        categories: Vec<Category>,
    },
    ProductDetail {
        product: Option<Product>,
        related: Vec<Product>,
    },
    Blog {
        articles: Vec<Article>,
    },
    ArticleDetail {
        article: Option<Article>,
        related: Vec<Article>,
    },
    Contact {
        /// Offered in the inquiry form's product select
        products: Vec<Product>,
    },
}

impl PageContent {
    /// Whether a required lookup came back empty
    pub fn is_missing_required(&self) -> bool {
        matches!(
            self,
            PageContent::ProductDetail { product: None, .. }
                | PageContent::ArticleDetail { article: None, .. }
        )
    }

    /// Whether this content was fetched for the given template
    pub fn fits(&self, template: &PageTemplate) -> bool {
        matches!(
            (self, template),
            (PageContent::Home { .. }, PageTemplate::Home)
                | (PageContent::About, PageTemplate::About)
                | (PageContent::Products { .. }, PageTemplate::Products { .. })
                | (PageContent::ProductDetail { .. }, PageTemplate::ProductDetail { .. })
                | (PageContent::Blog { .. }, PageTemplate::Blog)
                | (PageContent::ArticleDetail { .. }, PageTemplate::ArticleDetail { .. })
                | (PageContent::Contact { .. }, PageTemplate::Contact)
        )
    }
}
