//! Renderer-independent page model

use agro_shared::Locale;

use crate::domain::entities::ImageRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Summary of an entity on a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub href: String,
    pub summary: Option<String>,
    pub image: Option<ImageRef>,
    /// Small print under the title (date, category)
    pub meta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
    /// Select with a placeholder and options
    Select {
        placeholder: String,
        options: Vec<String>,
    },
}

/// Main-content blocks, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Hero {
        heading: String,
        subheading: Option<String>,
        cta: Option<Link>,
    },
    Text {
        heading: Option<String>,
        paragraphs: Vec<String>,
    },
    Bullets {
        heading: String,
        items: Vec<String>,
    },
    CategoryFilter {
        label: String,
        options: Vec<Link>,
        /// Href of the selected option
        active: String,
    },
    ProductGrid {
        heading: String,
        cards: Vec<Card>,
        empty_message: Option<String>,
        more: Option<Link>,
    },
    ArticleList {
        heading: String,
        cards: Vec<Card>,
        empty_message: Option<String>,
        more: Option<Link>,
    },
    ProductDetail {
        name: String,
        summary: Option<String>,
        paragraphs: Vec<String>,
        image: Option<ImageRef>,
        gallery: Vec<ImageRef>,
        facts: Vec<(String, String)>,
        inquiry: Link,
        back: Link,
    },
    ArticleBody {
        title: String,
        meta: Option<String>,
        image: Option<ImageRef>,
        paragraphs: Vec<String>,
        tags: Vec<String>,
        back: Link,
    },
    ContactForm {
        action: String,
        fields: Vec<FormField>,
        submit: String,
    },
    NotFound {
        heading: String,
        message: String,
        home: Link,
    },
}

/// A composed page, before serialization to HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    pub locale: Locale,
    /// Path below the locale prefix, used for canonical and alternate links
    pub path: String,
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub sections: Vec<Section>,
    /// Ask crawlers not to index (not-found pages)
    pub noindex: bool,
}
