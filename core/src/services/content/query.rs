//! Typed query descriptors and their GROQ serialization

use std::cmp::Ordering;
use std::collections::BTreeMap;

use agro_shared::Locale;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::domain::entities::{ContentEntity, EntityKind};

/// Predicate narrowing a query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// `slug.current == $slug`
    SlugEquals(String),
    /// `slug.current != $excludeSlug`
    SlugNotEquals(String),
    /// Category reference equals the given document id
    CategoryEquals(String),
    /// Referenced category has the given slug
    CategorySlugEquals(String),
    /// `featured == true`
    Featured,
    /// Same category as the document with the given slug.
    ///
    /// Resolved inside the store with a subquery, so related items can be
    /// fetched without waiting for the primary document.
    SharesCategoryWith(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKey {
    Featured,
    PublishedAt,
    CreatedAt,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderBy {
    pub key: OrderKey,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(key: OrderKey) -> Self {
        Self {
            key,
            direction: Direction::Asc,
        }
    }

    pub fn desc(key: OrderKey) -> Self {
        Self {
            key,
            direction: Direction::Desc,
        }
    }
}

/// What to fetch from the content store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub kind: EntityKind,
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
    pub limit: Option<usize>,
    /// Return the first match instead of a list
    pub single: bool,
    /// Revalidation interval in seconds; `None` uses the gateway default,
    /// `Some(0)` disables caching
    pub revalidate: Option<u64>,
}

/// Serialized query ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct GroqQuery {
    pub kind: EntityKind,
    pub query: String,
    /// Named parameters without the `$` sigil
    pub params: BTreeMap<String, Value>,
    pub single: bool,
}

impl ContentQuery {
    /// Listing of every document of a kind that has a slug
    pub fn list(kind: EntityKind) -> Self {
        Self {
            kind,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            single: false,
            revalidate: None,
        }
    }

    /// Single-document lookup by slug
    pub fn by_slug(kind: EntityKind, slug: impl Into<String>) -> Self {
        Self {
            single: true,
            ..Self::list(kind).filter(Filter::SlugEquals(slug.into()))
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn revalidate(mut self, seconds: u64) -> Self {
        self.revalidate = Some(seconds);
        self
    }

    /// Serialize for a locale. Localized fields resolve against `$locale`
    /// and fall back to `$defaultLocale`.
    pub fn to_groq(&self, locale: Locale) -> GroqQuery {
        let mut params = BTreeMap::new();
        params.insert("locale".to_string(), Value::from(locale.code()));
        params.insert("defaultLocale".to_string(), Value::from(Locale::DEFAULT.code()));

        let mut conditions = vec![
            format!("_type == \"{}\"", self.kind.type_name()),
            "defined(slug.current)".to_string(),
        ];
        let category = self.kind.category_field();
        for filter in &self.filters {
            let (condition, name, value) = match filter {
                Filter::SlugEquals(slug) => ("slug.current == $slug".to_string(), "slug", slug.as_str()),
                Filter::SlugNotEquals(slug) => (
                    "slug.current != $excludeSlug".to_string(),
                    "excludeSlug",
                    slug.as_str(),
                ),
                Filter::CategoryEquals(id) => {
                    (format!("{}._ref == $categoryId", category), "categoryId", id.as_str())
                }
                Filter::CategorySlugEquals(slug) => (
                    format!("{}->slug.current == $categorySlug", category),
                    "categorySlug",
                    slug.as_str(),
                ),
                Filter::Featured => {
                    conditions.push("featured == true".to_string());
                    continue;
                }
                Filter::SharesCategoryWith(slug) => (
                    format!(
                        "defined({c}._ref) && {c}._ref == *[_type == \"{t}\" && slug.current == $relatedTo][0].{c}._ref",
                        c = category,
                        t = self.kind.type_name()
                    ),
                    "relatedTo",
                    slug.as_str(),
                ),
            };
            conditions.push(condition);
            params.insert(name.to_string(), Value::from(value));
        }

        let mut query = format!("*[{}]", conditions.join(" && "));
        query.push_str(&format!(" | order({})", self.order_clauses().join(", ")));
        if self.single {
            query.push_str(" [0]");
        } else if let Some(limit) = self.limit {
            query.push_str(&format!(" [0...{}]", limit));
        }
        query.push_str(&format!(" {{ {} }}", self.kind.projection()));

        GroqQuery {
            kind: self.kind,
            query,
            params,
            single: self.single,
        }
    }

    /// Store-side ordering matching [`ContentQuery::compare`], so a limit
    /// cuts the same rows the local re-sort would keep.
    fn order_clauses(&self) -> Vec<String> {
        let name = self.kind.sort_name_expression();
        let mut clauses = Vec::new();
        for order in &self.order {
            let direction = order.direction.as_groq();
            match order.key {
                OrderKey::Featured => clauses.push(format!("coalesce(featured, false) {}", direction)),
                OrderKey::Name => clauses.push(format!("{} {}", name, direction)),
                OrderKey::PublishedAt | OrderKey::CreatedAt => {
                    let field = date_field(order.key);
                    // undated rows last in both directions
                    clauses.push(format!("defined({}) desc", field));
                    clauses.push(format!("{} {}", field, direction));
                }
            }
        }
        if !self.order.iter().any(|o| o.key == OrderKey::Name) {
            clauses.push(format!("{} asc", name));
        }
        clauses.push("_id asc".to_string());
        clauses
    }

    /// Compare two entities by this query's ordering, then by name
    /// (case-sensitive) and id so that the result is total.
    pub fn compare<T: ContentEntity>(&self, a: &T, b: &T) -> Ordering {
        self.order
            .iter()
            .map(|o| compare_key(o, a, b))
            .chain([a.sort_name().cmp(b.sort_name()), a.id().cmp(b.id())])
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Direction {
    fn as_groq(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

fn compare_key<T: ContentEntity>(order: &OrderBy, a: &T, b: &T) -> Ordering {
    match order.key {
        OrderKey::Featured => order.direction.apply(a.featured().cmp(&b.featured())),
        OrderKey::Name => order.direction.apply(a.sort_name().cmp(b.sort_name())),
        OrderKey::PublishedAt => compare_dates(order.direction, a.published_at(), b.published_at()),
        OrderKey::CreatedAt => compare_dates(order.direction, a.created_at(), b.created_at()),
    }
}

fn date_field(key: OrderKey) -> &'static str {
    match key {
        OrderKey::CreatedAt => "_createdAt",
        _ => "publishedAt",
    }
}

/// Undated entities sort after dated ones in either direction
fn compare_dates<D: Ord>(direction: Direction, a: Option<D>, b: Option<D>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl GroqQuery {
    /// Deterministic cache key for this query shape, parameters and locale
    pub fn cache_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.query.as_bytes());
        for (name, value) in &self.params {
            hasher.update(b"\0");
            hasher.update(name.as_bytes());
            hasher.update(b"=");
            hasher.update(value.to_string().as_bytes());
        }
        let digest = hex::encode(hasher.finalize());
        let locale = self
            .params
            .get("locale")
            .and_then(Value::as_str)
            .unwrap_or(Locale::DEFAULT.code());
        format!("content:{}:{}:{}", self.kind.type_name(), locale, &digest[..32])
    }
}
