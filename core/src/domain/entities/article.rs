//! Article entity: a blog post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::{ContentEntity, EntityKind};
use super::media::{CategoryRef, ImageRef};
use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(deserialize_with = "null_as_default", default)]
    pub slug: String,

    #[serde(deserialize_with = "null_as_default", default)]
    pub title: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    /// Plain text of the rich-text body, blocks separated by blank lines
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub image: Option<ImageRef>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub category: Option<CategoryRef>,

    #[serde(deserialize_with = "null_as_default", default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Body split into non-empty paragraphs
    pub fn paragraphs(&self) -> Vec<&str> {
        self.body
            .as_deref()
            .unwrap_or_default()
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Date shown on cards: publication date, else creation date
    pub fn display_date(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }
}

impl ContentEntity for Article {
    const KIND: EntityKind = EntityKind::Article;

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn sort_name(&self) -> &str {
        &self.title
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
