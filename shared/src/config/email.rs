//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::{env_flag, env_opt, env_or, env_parse, env_required, ConfigError};

/// Which transport delivers contact-form email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Logs messages instead of sending them
    Mock,
    /// Resend-compatible HTTP API
    Resend,
    /// Plain SMTP relay
    Smtp,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(EmailProvider::Mock),
            "resend" | "http" => Ok(EmailProvider::Resend),
            "smtp" => Ok(EmailProvider::Smtp),
            _ => Err(format!("Unknown email provider: {}", s)),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpSettings {
    /// SMTP server hostname
    pub host: String,

    /// SMTP server port (587 for STARTTLS)
    pub port: u16,

    /// Optional username for SMTP authentication
    #[serde(default)]
    pub username: Option<String>,

    /// Optional password for SMTP authentication
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Whether to use STARTTLS for the connection
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
}

/// Email transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Selected transport
    pub provider: EmailProvider,

    /// API key for the HTTP provider
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the HTTP provider
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Sender address, e.g. `Agro Export <noreply@example.com>`
    pub from: String,

    /// Inbox receiving contact-form submissions
    pub to: Vec<String>,

    /// SMTP relay settings when `provider` is SMTP
    #[serde(default)]
    pub smtp: Option<SmtpSettings>,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            api_key: None,
            api_url: default_api_url(),
            from: String::from("Agro Export <noreply@localhost>"),
            to: vec![String::from("sales@localhost")],
            smtp: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    ///
    /// The mock provider needs nothing. Real providers require a sender, a
    /// recipient and their own credentials.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider: EmailProvider = env_or("EMAIL_PROVIDER", "mock")
            .parse()
            .map_err(|reason| ConfigError::Invalid {
                key: "EMAIL_PROVIDER",
                reason,
            })?;

        let defaults = Self::default();
        let (from, to) = match provider {
            EmailProvider::Mock => (
                env_opt("EMAIL_FROM").unwrap_or(defaults.from),
                env_opt("EMAIL_TO").map(|v| split_recipients(&v)).unwrap_or(defaults.to),
            ),
            EmailProvider::Resend | EmailProvider::Smtp => (
                env_required("EMAIL_FROM")?,
                split_recipients(&env_required("EMAIL_TO")?),
            ),
        };

        if to.is_empty() {
            return Err(ConfigError::Invalid {
                key: "EMAIL_TO",
                reason: String::from("at least one recipient is required"),
            });
        }

        let api_key = match provider {
            EmailProvider::Resend => Some(env_required("EMAIL_API_KEY")?),
            _ => env_opt("EMAIL_API_KEY"),
        };

        let smtp = match provider {
            EmailProvider::Smtp => Some(SmtpSettings {
                host: env_required("SMTP_HOST")?,
                port: env_parse("SMTP_PORT", 587)?,
                username: env_opt("SMTP_USERNAME"),
                password: env_opt("SMTP_PASSWORD"),
                use_tls: env_flag("SMTP_USE_TLS", true)?,
            }),
            _ => None,
        };

        Ok(Self {
            provider,
            api_key,
            api_url: env_or("EMAIL_API_URL", &default_api_url()),
            from,
            to,
            smtp,
            timeout_secs: env_parse("EMAIL_TIMEOUT_SECS", default_timeout())?,
        })
    }
}

/// Split a comma separated recipient list
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_api_url() -> String {
    String::from("https://api.resend.com")
}

fn default_use_tls() -> bool {
    true
}

fn default_timeout() -> u64 {
    15
}
