//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `{ success, data, timestamp }` envelope for successful JSON responses;
/// failures use [`crate::ErrorResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
        }
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but an optional backend (the shared cache) is unreachable
    Degraded,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Server version
    pub version: String,

    /// Per-dependency notes (cache backend, email provider, ...)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub components: HashMap<String, String>,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            service: service.into(),
            version: version.into(),
            components: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_component(mut self, name: impl Into<String>, detail: impl Into<String>) -> Self {
        self.components.insert(name.into(), detail.into());
        self
    }

    /// Mark the service degraded because `component` is failing
    pub fn degraded(mut self, component: impl Into<String>, detail: impl Into<String>) -> Self {
        self.status = HealthStatus::Degraded;
        self.with_component(component, detail)
    }
}
