//! Email Transport Module
//!
//! Delivery of contact-form email. Providers:
//!
//! - **Resend**: HTTP API (`POST /emails`)
//! - **SMTP**: any relay via `lettre`
//! - **Mock**: logs messages and keeps them in memory for development

use std::sync::Arc;

use agro_core::EmailTransport;
use agro_shared::{EmailConfig, EmailProvider};

pub mod mock_email;
pub mod resend;
pub mod smtp;

pub use mock_email::MockEmailTransport;
pub use resend::ResendTransport;
pub use smtp::SmtpTransport;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create the email transport selected by configuration
///
/// A real provider that fails to initialize is an error; there is no
/// fallback to the mock.
pub fn create_email_transport(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailTransport>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::warn!("Using mock email transport; contact submissions are only logged");
            Ok(Arc::new(MockEmailTransport::new()))
        }
        EmailProvider::Resend => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| InfrastructureError::Config("EMAIL_API_KEY not set".to_string()))?;
            Ok(Arc::new(ResendTransport::new(
                &config.api_url,
                api_key,
                config.timeout_secs,
            )?))
        }
        EmailProvider::Smtp => {
            let settings = config
                .smtp
                .as_ref()
                .ok_or_else(|| InfrastructureError::Config("SMTP_HOST not set".to_string()))?;
            Ok(Arc::new(SmtpTransport::new(settings, config.timeout_secs)?))
        }
    }
}

/// Hide the local part of an address for logs
pub fn mask_email(address: &str) -> String {
    let address = match (address.find('<'), address.rfind('>')) {
        (Some(start), Some(end)) if start < end => &address[start + 1..end],
        _ => address,
    };
    match address.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
