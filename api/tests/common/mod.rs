//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::web;
use agro_api::AppState;
use agro_core::{
    CachedResponse, ContactService, ContactServiceConfig, ContentGateway, ContentStore,
    ContentStoreError, EntityKind, GroqQuery, PageComposer, PageService, QueryCache,
};
use agro_infra::email::MockEmailTransport;
use agro_infra::i18n::create_dictionary_loader;
use agro_shared::SiteConfig;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// Content store answering slug lookups and listings from fixed documents
#[derive(Default)]
pub struct StubContentStore {
    docs: HashMap<EntityKind, Vec<Value>>,
    failing_params: Vec<String>,
}

impl StubContentStore {
    pub fn with_docs(mut self, kind: EntityKind, docs: Vec<Value>) -> Self {
        self.docs.insert(kind, docs);
        self
    }

    /// Fail every query carrying the parameter
    pub fn failing_on_param(mut self, param: &str) -> Self {
        self.failing_params.push(param.to_string());
        self
    }
}

#[async_trait]
impl ContentStore for StubContentStore {
    async fn query(&self, query: &GroqQuery) -> Result<Value, ContentStoreError> {
        if self.failing_params.iter().any(|p| query.params.contains_key(p)) {
            return Err(ContentStoreError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }

        let docs = self.docs.get(&query.kind).cloned().unwrap_or_default();
        let matches: Vec<Value> = docs
            .into_iter()
            .filter(|d| query.params.get("slug").map_or(true, |s| d["slug"] == *s))
            .filter(|d| query.params.get("excludeSlug").map_or(true, |s| d["slug"] != *s))
            .collect();

        if query.single {
            Ok(matches.into_iter().next().unwrap_or(Value::Null))
        } else {
            Ok(Value::Array(matches))
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Shared cache whose backend never answers
pub struct UnreachableCache;

#[async_trait]
impl QueryCache for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<CachedResponse>, ContentStoreError> {
        Err(unreachable_cache())
    }

    async fn put(&self, _key: &str, _response: &CachedResponse, _ttl: Duration) -> Result<(), ContentStoreError> {
        Err(unreachable_cache())
    }

    async fn invalidate(&self, _key: &str) -> Result<(), ContentStoreError> {
        Err(unreachable_cache())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn unreachable_cache() -> ContentStoreError {
    ContentStoreError::Cache {
        message: "connection refused".to_string(),
    }
}

pub fn product(slug: &str, name: &str) -> Value {
    json!({
        "_id": format!("p-{}", slug),
        "_createdAt": "2024-01-01T00:00:00Z",
        "slug": slug,
        "name": name,
        "shortDescription": format!("{} from Sumatra", name),
        "category": { "_id": "cat-coffee", "slug": "coffee", "name": "Coffee" },
        "featured": true,
        "publishedAt": "2024-02-01T00:00:00Z"
    })
}

pub fn article(slug: &str, title: &str) -> Value {
    json!({
        "_id": format!("a-{}", slug),
        "_createdAt": "2024-01-01T00:00:00Z",
        "slug": slug,
        "title": title,
        "excerpt": format!("About {}", title),
        "body": "First paragraph.",
        "category": { "_id": "cat-news", "slug": "news", "name": "News" },
        "tags": [],
        "publishedAt": "2024-04-01T00:00:00Z"
    })
}

pub fn catalog() -> StubContentStore {
    StubContentStore::default()
        .with_docs(
            EntityKind::Product,
            vec![
                product("arabica-coffee", "Arabica Coffee"),
                product("robusta-coffee", "Robusta Coffee"),
            ],
        )
        .with_docs(EntityKind::Article, vec![article("harvest-report", "Harvest report")])
        .with_docs(
            EntityKind::Category,
            vec![json!({ "_id": "cat-coffee", "slug": "coffee", "name": "Coffee" })],
        )
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub email: Arc<MockEmailTransport>,
}

/// Application state over embedded dictionaries and the given store
pub fn context_with(store: StubContentStore, email: MockEmailTransport) -> TestContext {
    build_context(store, email, None)
}

/// Like [`context`], with a shared cache that is down
pub fn context_with_unreachable_cache() -> TestContext {
    build_context(catalog(), MockEmailTransport::new(), Some(Arc::new(UnreachableCache)))
}

fn build_context(
    store: StubContentStore,
    email: MockEmailTransport,
    cache: Option<Arc<dyn QueryCache>>,
) -> TestContext {
    let email = Arc::new(email);
    let mut gateway = ContentGateway::new(Arc::new(store), 60);
    if let Some(cache) = &cache {
        gateway = gateway.with_cache(cache.clone());
    }
    let pages = PageService::new(
        Arc::new(create_dictionary_loader(None)),
        Arc::new(gateway),
        PageComposer::new(SiteConfig::default()),
    );
    let contact = ContactService::new(
        email.clone(),
        ContactServiceConfig {
            from: "Agro Export <web@agro.example>".to_string(),
            to: vec!["sales@agro.example".to_string()],
            site_name: "Agro Export".to_string(),
        },
    );

    let mut state = AppState::new(Arc::new(pages), Arc::new(contact));
    if let Some(cache) = cache {
        state = state.with_query_cache(cache);
    }
    TestContext {
        state: web::Data::new(state),
        email,
    }
}

pub fn context() -> TestContext {
    context_with(catalog(), MockEmailTransport::new())
}
