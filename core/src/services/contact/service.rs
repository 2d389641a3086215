//! Contact service implementation

use std::sync::Arc;

use agro_shared::html::escape_html;

use crate::errors::EmailError;

use super::traits::EmailTransport;
use super::types::{ContactSubmission, DeliveryReceipt, EmailMessage};

/// Addresses and branding for contact emails
#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Sender address
    pub from: String,
    /// Inbox receiving inquiries
    pub to: Vec<String>,
    /// Site name shown in the email footer
    pub site_name: String,
}

/// Contact service for delivering inquiries to the sales inbox
pub struct ContactService {
    /// Email transport used for delivery
    transport: Arc<dyn EmailTransport>,
    /// Service configuration
    config: ContactServiceConfig,
}

impl ContactService {
    pub fn new(transport: Arc<dyn EmailTransport>, config: ContactServiceConfig) -> Self {
        Self { transport, config }
    }

    pub fn provider_name(&self) -> &str {
        self.transport.provider_name()
    }

    /// Deliver a submission.
    ///
    /// Returns the transport's receipt, or its error unchanged so the caller
    /// can explain the failure to the submitter.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<DeliveryReceipt, EmailError> {
        let message = self.build_message(submission)?;

        match self.transport.send(&message).await {
            Ok(receipt) => {
                tracing::info!(
                    provider = self.transport.provider_name(),
                    message_id = %receipt.id,
                    event = "contact_delivered",
                    "Contact inquiry delivered"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!(
                    provider = self.transport.provider_name(),
                    error = %e,
                    event = "contact_delivery_failed",
                    "Contact inquiry delivery failed"
                );
                Err(e)
            }
        }
    }

    /// Build the outbound email for a submission
    pub fn build_message(&self, submission: &ContactSubmission) -> Result<EmailMessage, EmailError> {
        if self.config.to.is_empty() {
            return Err(EmailError::InvalidMessage {
                reason: "no recipient configured".to_string(),
            });
        }
        let header_fields = [
            Some(submission.email.as_str()),
            Some(submission.name.as_str()),
            submission.product.as_deref(),
        ];
        if header_fields.into_iter().flatten().any(|f| f.contains(['\r', '\n'])) {
            return Err(EmailError::InvalidMessage {
                reason: "header fields must not contain line breaks".to_string(),
            });
        }

        let subject = match non_blank(&submission.product) {
            Some(product) => format!("New inquiry from {} about {}", submission.name.trim(), product),
            None => format!("New inquiry from {}", submission.name.trim()),
        };

        let fields = self.fields(submission);

        let mut text = String::new();
        for (label, value) in &fields {
            text.push_str(&format!("{}: {}\n", label, value));
        }
        text.push_str(&format!("\n{}\n\n-- \nSent from the {} contact form\n", submission.message.trim(), self.config.site_name));

        let mut html = String::from("<h2>New inquiry</h2>\n<table>\n");
        for (label, value) in &fields {
            html.push_str(&format!(
                "<tr><th align=\"left\">{}</th><td>{}</td></tr>\n",
                label,
                escape_html(value)
            ));
        }
        html.push_str("</table>\n");
        for paragraph in submission.message.trim().split("\n\n") {
            html.push_str(&format!(
                "<p>{}</p>\n",
                escape_html(paragraph.trim()).replace('\n', "<br>")
            ));
        }
        html.push_str(&format!(
            "<p><small>Sent from the {} contact form</small></p>\n",
            escape_html(&self.config.site_name)
        ));

        Ok(EmailMessage {
            from: self.config.from.clone(),
            to: self.config.to.clone(),
            reply_to: Some(submission.email.trim().to_string()),
            subject,
            html,
            text,
        })
    }

    fn fields<'a>(&self, submission: &'a ContactSubmission) -> Vec<(&'static str, &'a str)> {
        let mut fields = vec![
            ("Name", submission.name.trim()),
            ("Email", submission.email.trim()),
        ];
        for (label, value) in [
            ("Company", &submission.company),
            ("Phone", &submission.phone),
            ("Product", &submission.product),
        ] {
            if let Some(value) = non_blank(value) {
                fields.push((label, value));
            }
        }
        fields
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
