//! Category entity grouping products and articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::{ContentEntity, EntityKind};
use super::media::{CategoryRef, ImageRef};
use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(deserialize_with = "null_as_default", default)]
    pub slug: String,

    #[serde(deserialize_with = "null_as_default", default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<ImageRef>,

    /// Parent category for sub-categories
    #[serde(default)]
    pub parent: Option<CategoryRef>,

    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

impl ContentEntity for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn category_id(&self) -> Option<&str> {
        self.parent.as_ref().map(|c| c.id.as_str())
    }
}
