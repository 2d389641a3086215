//! Sanity HTTP query client
//!
//! Runs GROQ queries against the dataset query endpoint. Parameters are sent
//! as `$name=<json>` query-string pairs; queries whose URL would exceed the
//! API's GET limit are sent as a POST body instead.

use std::time::Duration;

use agro_core::{ContentStore, ContentStoreError, GroqQuery};
use agro_shared::ContentStoreConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use crate::InfrastructureError;

/// URLs longer than this are sent with POST
const MAX_GET_URL_LENGTH: usize = 10_000;

/// Longest error body kept in error messages
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    ms: Option<u64>,
}

/// Content store backed by the Sanity query API
pub struct SanityClient {
    client: Client,
    config: ContentStoreConfig,
    query_url: String,
}

impl SanityClient {
    /// Create a client with the configured timeout
    pub fn new(config: ContentStoreConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("agro-export/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let query_url = config.query_url();

        tracing::info!(
            project = %config.project_id,
            dataset = %config.dataset,
            cdn = config.use_cdn,
            authenticated = config.token.is_some(),
            "Sanity client initialized"
        );

        Ok(Self {
            client,
            config,
            query_url,
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get_request(&self, query: &GroqQuery) -> Result<RequestBuilder, ContentStoreError> {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(query.params.len() + 1);
        pairs.push(("query".to_string(), query.query.clone()));
        for (name, value) in &query.params {
            let encoded = serde_json::to_string(value).map_err(|e| ContentStoreError::Decode {
                message: format!("parameter ${}: {}", name, e),
            })?;
            pairs.push((format!("${}", name), encoded));
        }
        Ok(self.authorize(self.client.get(&self.query_url).query(&pairs)))
    }

    fn post_request(&self, query: &GroqQuery) -> RequestBuilder {
        let params: Map<String, Value> = query
            .params
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        self.authorize(
            self.client
                .post(&self.query_url)
                .json(&json!({ "query": query.query, "params": params })),
        )
    }

    async fn read_response(response: Response) -> Result<Value, ContentStoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentStoreError::Status {
                status: status.as_u16(),
                message: error_description(status, &body),
            });
        }

        let body: QueryResponse = response.json().await.map_err(|e| ContentStoreError::Decode {
            message: e.to_string(),
        })?;
        if let Some(ms) = body.ms {
            debug!(ms, "Sanity query timing");
        }
        Ok(body.result)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn query(&self, query: &GroqQuery) -> Result<Value, ContentStoreError> {
        let get = self.get_request(query)?;
        let request = match get.try_clone().and_then(|r| r.build().ok()) {
            Some(built) if built.url().as_str().len() > MAX_GET_URL_LENGTH => {
                debug!(kind = %query.kind.type_name(), "Query too long for GET, using POST");
                self.post_request(query)
            }
            _ => get,
        };

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("timed out after {}s", self.config.timeout_secs)
            } else {
                e.to_string()
            };
            warn!(
                kind = %query.kind.type_name(),
                error = %message,
                event = "content_store_unreachable",
                "Sanity request failed"
            );
            ContentStoreError::Transport { message }
        })?;

        Self::read_response(response).await.map_err(|e| {
            error!(
                kind = %query.kind.type_name(),
                error = %e,
                event = "content_store_error",
                "Sanity query failed"
            );
            e
        })
    }

    fn name(&self) -> &str {
        "sanity"
    }
}

/// Best-effort description from a Sanity error body
pub(crate) fn error_description(status: StatusCode, body: &str) -> String {
    let described = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.pointer("/error/description")
            .or_else(|| v.pointer("/error/message"))
            .or_else(|| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    match described {
        Some(description) => description,
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
        None => body.chars().take(MAX_ERROR_BODY).collect(),
    }
}
