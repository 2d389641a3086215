//! Resend HTTP API transport
//!
//! Sends one `POST {api_url}/emails` per message with a bearer API key and
//! returns the provider's message id.

use std::time::Duration;

use agro_core::{DeliveryReceipt, EmailError, EmailMessage, EmailTransport};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::mask_email;
use crate::InfrastructureError;

const PROVIDER: &str = "resend";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Email transport for Resend-compatible HTTP APIs
pub struct ResendTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ResendTransport {
    pub fn new(api_url: &str, api_key: String, timeout_secs: u64) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let endpoint = format!("{}/emails", api_url.trim_end_matches('/'));
        info!(endpoint = %endpoint, "Resend email transport initialized");
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, EmailError> {
        let body = SendRequest {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
            reply_to: message.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, event = "email_unreachable", "Resend request failed");
                EmailError::Transport {
                    provider: PROVIDER.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorBody>(&raw)
                .ok()
                .and_then(|b| b.message.or(b.name))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            error!(
                status = status.as_u16(),
                reason = %reason,
                event = "email_rejected",
                "Resend rejected the message"
            );
            return Err(EmailError::Rejected {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                reason,
            });
        }

        let sent: SendResponse = response.json().await.map_err(|e| EmailError::Transport {
            provider: PROVIDER.to_string(),
            reason: format!("unreadable response: {}", e),
        })?;

        info!(
            id = %sent.id,
            to = %message.to.iter().map(|t| mask_email(t)).collect::<Vec<_>>().join(","),
            event = "email_sent",
            "Email accepted by Resend"
        );
        Ok(DeliveryReceipt::new(sent.id))
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
