//! Shared application state

use std::collections::BTreeMap;
use std::sync::Arc;

use agro_core::{ContactService, ContactServiceConfig, PageComposer, PageService, QueryCache};
use agro_infra::InfrastructureServices;
use agro_shared::AppConfig;

/// Services shared by all workers
pub struct AppState {
    pub pages: Arc<PageService>,
    pub contact: Arc<ContactService>,
    /// Backends reported by the health endpoint
    pub components: BTreeMap<String, String>,
    /// Shared query cache, checked by the health endpoint
    pub query_cache: Option<Arc<dyn QueryCache>>,
}

impl AppState {
    pub fn new(pages: Arc<PageService>, contact: Arc<ContactService>) -> Self {
        let mut components = BTreeMap::new();
        components.insert("email".to_string(), contact.provider_name().to_string());
        Self {
            pages,
            contact,
            components,
            query_cache: None,
        }
    }

    pub fn with_query_cache(mut self, cache: Arc<dyn QueryCache>) -> Self {
        self.query_cache = Some(cache);
        self
    }

    pub fn with_component(mut self, name: impl Into<String>, detail: impl Into<String>) -> Self {
        self.components.insert(name.into(), detail.into());
        self
    }

    /// Wire the page and contact services over initialized infrastructure
    pub fn from_infrastructure(config: &AppConfig, infra: &InfrastructureServices) -> Self {
        let pages = PageService::new(
            infra.dictionaries.clone(),
            Arc::new(infra.content_gateway()),
            PageComposer::new(config.site.clone()),
        );
        let contact = ContactService::new(
            infra.email.clone(),
            ContactServiceConfig {
                from: config.email.from.clone(),
                to: config.email.to.clone(),
                site_name: config.site.name.clone(),
            },
        );

        Self::new(Arc::new(pages), Arc::new(contact))
            .with_component("content_store", infra.content_store.name())
            .with_component("cache", format!("{:?}", config.cache.backend).to_lowercase())
            .with_query_cache(infra.query_cache.clone())
    }
}
