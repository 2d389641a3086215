//! Product entity: an exportable commodity in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::{ContentEntity, EntityKind};
use super::media::{CategoryRef, ImageRef};
use super::null_as_default;

/// One row of a product's specification table (grade, moisture, packing...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub label: String,
    pub value: String,
}

/// Product as projected for listing and detail pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(deserialize_with = "null_as_default", default)]
    pub slug: String,

    #[serde(deserialize_with = "null_as_default", default)]
    pub name: String,

    /// One-line summary used on cards
    #[serde(default)]
    pub short_description: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<ImageRef>,

    #[serde(deserialize_with = "null_as_default", default)]
    pub gallery: Vec<ImageRef>,

    #[serde(default)]
    pub category: Option<CategoryRef>,

    #[serde(default)]
    pub sub_category: Option<CategoryRef>,

    #[serde(deserialize_with = "null_as_default", default)]
    pub specifications: Vec<Specification>,

    /// Region of origin, e.g. "North Sumatra"
    #[serde(default)]
    pub origin: Option<String>,

    #[serde(deserialize_with = "null_as_default", default)]
    pub featured: bool,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Card summary, preferring the short description
    pub fn summary(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .or(self.description.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

impl ContentEntity for Product {
    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id.as_str())
    }
}
