//! Content store (headless CMS) configuration

use serde::{Deserialize, Serialize};

use super::{env_flag, env_opt, env_or, env_parse, env_required, ConfigError};

/// Connection settings for the Sanity-compatible content store query API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentStoreConfig {
    /// Project identifier; selects the API host
    pub project_id: String,

    /// Dataset to query
    pub dataset: String,

    /// API version date, e.g. `2024-01-01`
    pub api_version: String,

    /// Read token for private datasets or drafts
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Query the CDN edge instead of the live API
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,

    /// Explicit base URL, replacing the host derived from the project id
    #[serde(default)]
    pub api_host: Option<String>,

    /// Transport timeout for a single query in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ContentStoreConfig {
    /// Create a configuration for a project and dataset with defaults elsewhere
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            api_version: String::from("2024-01-01"),
            token: None,
            use_cdn: default_use_cdn(),
            api_host: None,
            timeout_secs: default_timeout(),
        }
    }

    /// Create from environment variables
    ///
    /// `SANITY_PROJECT_ID` is required; pages cannot render without content.
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = env_required("SANITY_PROJECT_ID")?;
        if !project_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ConfigError::Invalid {
                key: "SANITY_PROJECT_ID",
                reason: String::from("must contain only letters, digits and hyphens"),
            });
        }

        Ok(Self {
            project_id,
            dataset: env_or("SANITY_DATASET", "production"),
            api_version: env_or("SANITY_API_VERSION", "2024-01-01"),
            token: env_opt("SANITY_API_TOKEN"),
            use_cdn: env_flag("SANITY_USE_CDN", true)?,
            api_host: env_opt("SANITY_API_HOST"),
            timeout_secs: env_parse("SANITY_TIMEOUT_SECS", default_timeout())?,
        })
    }

    /// Point the client at a custom host (proxies, test servers)
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    /// Base URL of the API, without trailing slash
    pub fn base_url(&self) -> String {
        match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let domain = if self.use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", self.project_id, domain)
            }
        }
    }

    /// Full URL of the query endpoint for the configured dataset
    pub fn query_url(&self) -> String {
        let version = self.api_version.trim_start_matches('v');
        format!(
            "{}/v{}/data/query/{}",
            self.base_url(),
            version,
            self.dataset
        )
    }
}

fn default_use_cdn() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}
