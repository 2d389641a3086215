//! Entity kinds and the contract shared by every content entity

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The document types this site reads from the content store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Article,
    Category,
}

impl EntityKind {
    /// `_type` of the document in the content store
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Article => "post",
            EntityKind::Category => "category",
        }
    }

    /// Field holding the display name, used for name ordering
    pub fn name_field(&self) -> &'static str {
        match self {
            EntityKind::Article => "title",
            EntityKind::Product | EntityKind::Category => "name",
        }
    }

    /// Localized display name as a GROQ expression, for store-side ordering
    pub fn sort_name_expression(&self) -> String {
        localized(self.name_field())
    }

    /// Reference field pointing at the owning category
    pub fn category_field(&self) -> &'static str {
        match self {
            EntityKind::Product | EntityKind::Article => "category",
            EntityKind::Category => "parent",
        }
    }

    /// Explicit projection selecting only the fields pages use
    pub fn projection(&self) -> &'static str {
        match self {
            EntityKind::Product => PRODUCT_PROJECTION.as_str(),
            EntityKind::Article => ARTICLE_PROJECTION.as_str(),
            EntityKind::Category => CATEGORY_PROJECTION.as_str(),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Localized field: the requested locale, then the default, then a plain value
fn localized(field: &str) -> String {
    format!(
        "coalesce({f}[$locale], {f}[$defaultLocale], {f})",
        f = field
    )
}

fn image(field: &str) -> String {
    format!(
        "{}{{ \"url\": asset->url, \"alt\": {} }}",
        field,
        localized("alt")
    )
}

fn category_ref(field: &str) -> String {
    format!(
        "{}->{{ _id, \"slug\": slug.current, \"name\": {} }}",
        field,
        localized("name")
    )
}

static PRODUCT_PROJECTION: Lazy<String> = Lazy::new(|| {
    [
        "_id".to_string(),
        "_createdAt".to_string(),
        "\"slug\": slug.current".to_string(),
        format!("\"name\": {}", localized("name")),
        format!("\"shortDescription\": {}", localized("shortDescription")),
        format!("\"description\": {}", localized("description")),
        format!("\"image\": {}", image("mainImage")),
        format!("\"gallery\": {}", image("gallery[]")),
        format!("\"category\": {}", category_ref("category")),
        format!("\"subCategory\": {}", category_ref("subCategory")),
        format!(
            "\"specifications\": specifications[]{{ \"label\": {}, \"value\": {} }}",
            localized("label"),
            localized("value")
        ),
        "origin".to_string(),
        "\"featured\": coalesce(featured, false)".to_string(),
        "publishedAt".to_string(),
    ]
    .join(", ")
});

static ARTICLE_PROJECTION: Lazy<String> = Lazy::new(|| {
    [
        "_id".to_string(),
        "_createdAt".to_string(),
        "\"slug\": slug.current".to_string(),
        format!("\"title\": {}", localized("title")),
        format!("\"excerpt\": {}", localized("excerpt")),
        format!("\"body\": pt::text({})", localized("body")),
        format!("\"image\": {}", image("mainImage")),
        "\"author\": author->name".to_string(),
        format!("\"category\": {}", category_ref("category")),
        "\"tags\": coalesce(tags, [])".to_string(),
        "publishedAt".to_string(),
    ]
    .join(", ")
});

static CATEGORY_PROJECTION: Lazy<String> = Lazy::new(|| {
    [
        "_id".to_string(),
        "_createdAt".to_string(),
        "\"slug\": slug.current".to_string(),
        format!("\"name\": {}", localized("name")),
        format!("\"description\": {}", localized("description")),
        format!("\"image\": {}", image("image")),
        format!("\"parent\": {}", category_ref("parent")),
    ]
    .join(", ")
});

/// Contract every entity fulfils so the gateway can validate and order it
/// without knowing its concrete shape.
pub trait ContentEntity: DeserializeOwned + Send + Sync + 'static {
    /// Document type the entity is read from
    const KIND: EntityKind;

    /// Stable identifier (`_id`)
    fn id(&self) -> &str;

    /// URL slug, unique per kind
    fn slug(&self) -> &str;

    /// Display name used for the final ordering tie-break
    fn sort_name(&self) -> &str;

    fn featured(&self) -> bool {
        false
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Identifier of the referenced category, if any
    fn category_id(&self) -> Option<&str> {
        None
    }

    /// Check the fields a page cannot do without.
    ///
    /// Returns a description of the first problem found.
    fn validate(&self) -> Result<(), String> {
        if self.id().trim().is_empty() {
            return Err(String::from("missing _id"));
        }
        if self.slug().trim().is_empty() {
            return Err(String::from("missing slug"));
        }
        if self.slug().contains('/') {
            return Err(format!("slug '{}' contains '/'", self.slug()));
        }
        if self.sort_name().trim().is_empty() {
            return Err(format!("missing {}", Self::KIND.name_field()));
        }
        Ok(())
    }
}
