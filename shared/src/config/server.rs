//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or, env_parse, ConfigError};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: env_parse("SERVER_PORT", 8080)?,
            workers: env_parse("SERVER_WORKERS", 0)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Public identity of the site, used for canonical links and page titles
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Public origin without trailing slash, e.g. `https://example.com`
    pub url: String,

    /// Brand name appended to page titles
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:8080"),
            name: String::from("Agro Export"),
        }
    }
}

impl SiteConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_opt("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.url),
            name: env_opt("SITE_NAME").unwrap_or(defaults.name),
        }
    }

    /// Absolute URL for a site-relative path
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.url, path)
        } else {
            format!("{}/{}", self.url, path)
        }
    }
}
