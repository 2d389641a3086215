//! SMTP relay transport built on `lettre`

use std::time::Duration;

use agro_core::{DeliveryReceipt, EmailError, EmailMessage, EmailTransport};
use agro_shared::SmtpSettings;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};
use uuid::Uuid;

use super::mask_email;
use crate::InfrastructureError;

const PROVIDER: &str = "smtp";

/// Email transport over an SMTP relay
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpTransport {
    pub fn new(settings: &SmtpSettings, timeout_secs: u64) -> Result<Self, InfrastructureError> {
        let builder = if settings.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| InfrastructureError::Email(format!("Invalid SMTP relay: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        let mut builder = builder
            .port(settings.port)
            .timeout(Some(Duration::from_secs(timeout_secs)));
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(
            host = %settings.host,
            port = settings.port,
            tls = settings.use_tls,
            "SMTP email transport initialized"
        );
        Ok(Self {
            mailer: builder.build(),
            host: settings.host.clone(),
        })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address.parse().map_err(|e| EmailError::InvalidMessage {
        reason: format!("invalid address '{}': {}", address, e),
    })
}

/// Build the MIME message with plain text and HTML alternatives
pub(crate) fn build_message(message: &EmailMessage, message_id: &str) -> Result<Message, EmailError> {
    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone())
        .message_id(Some(format!("<{}@agro-export>", message_id)));
    for to in &message.to {
        builder = builder.to(mailbox(to)?);
    }
    if let Some(reply_to) = &message.reply_to {
        builder = builder.reply_to(mailbox(reply_to)?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            message.text.clone(),
            message.html.clone(),
        ))
        .map_err(|e| EmailError::InvalidMessage {
            reason: e.to_string(),
        })
}

#[async_trait]
impl EmailTransport for SmtpTransport {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, EmailError> {
        let id = Uuid::new_v4().to_string();
        let email = build_message(message, &id)?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!(
                    id = %id,
                    to = %message.to.iter().map(|t| mask_email(t)).collect::<Vec<_>>().join(","),
                    event = "email_sent",
                    "Email accepted by SMTP relay"
                );
                Ok(DeliveryReceipt::new(id))
            }
            Err(e) => {
                error!(host = %self.host, error = %e, event = "email_failed", "SMTP delivery failed");
                match e.status() {
                    Some(code) if e.is_permanent() => Err(EmailError::Rejected {
                        provider: PROVIDER.to_string(),
                        status: code.to_string().parse().unwrap_or(550),
                        reason: e.to_string(),
                    }),
                    _ => Err(EmailError::Transport {
                        provider: PROVIDER.to_string(),
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
