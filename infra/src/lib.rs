//! # Infrastructure Layer
//!
//! Concrete implementations of the outbound collaborators declared in
//! `agro_core`:
//! - **CMS**: Sanity HTTP query client
//! - **Cache**: in-memory and Redis query response caches
//! - **i18n**: embedded and filesystem dictionary sources
//! - **Email**: Resend-compatible HTTP API, SMTP relay and a logging mock
//!
//! [`initialize`] wires all of them from an [`AppConfig`].

use std::sync::Arc;

use agro_core::{ContentGateway, ContentStore, DictionaryLoader, EmailTransport, QueryCache};
use agro_shared::AppConfig;

/// CMS module - content store clients
pub mod cms;

/// Cache module - query response caches
pub mod cache;

/// Email module - outbound transports
pub mod email;

/// Dictionary sources for translated text
pub mod i18n;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    pub content_store: Arc<dyn ContentStore>,
    pub query_cache: Arc<dyn QueryCache>,
    pub dictionaries: Arc<DictionaryLoader>,
    pub email: Arc<dyn EmailTransport>,
    default_revalidate_secs: u64,
}

impl InfrastructureServices {
    /// Content gateway over the configured store and cache
    pub fn content_gateway(&self) -> ContentGateway {
        ContentGateway::new(self.content_store.clone(), self.default_revalidate_secs)
            .with_cache(self.query_cache.clone())
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The CMS HTTP client
/// - The query cache (connecting to Redis when configured)
/// - Dictionary sources, loading every bundle once
/// - The email transport
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let content_store: Arc<dyn ContentStore> = Arc::new(cms::SanityClient::new(config.content.clone())?);
    let query_cache = cache::create_query_cache(&config.cache).await?;

    let dictionaries = Arc::new(i18n::create_dictionary_loader(config.dictionary_dir.as_deref()));
    dictionaries
        .preload()
        .await
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    let email = email::create_email_transport(&config.email)?;

    tracing::info!(
        content_store = %content_store.name(),
        cache = ?config.cache.backend,
        email = %email.provider_name(),
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices {
        content_store,
        query_cache,
        dictionaries,
        email,
        default_revalidate_secs: config.cache.default_revalidate_secs,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport setup error
    #[error("Email transport error: {0}")]
    Email(String),

    /// Cached payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
