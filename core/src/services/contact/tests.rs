//! Unit tests for the contact service

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{
    ContactService, ContactServiceConfig, ContactSubmission, DeliveryReceipt, EmailMessage,
    EmailTransport,
};
use crate::errors::EmailError;

// Mock email transport for testing
struct MockTransport {
    sent: Mutex<Vec<EmailMessage>>,
    should_fail: bool,
}

impl MockTransport {
    fn new(should_fail: bool) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            should_fail,
        })
    }
}

#[async_trait]
impl EmailTransport for MockTransport {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, EmailError> {
        if self.should_fail {
            return Err(EmailError::Transport {
                provider: "mock".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(DeliveryReceipt::new("msg-1"))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

fn config() -> ContactServiceConfig {
    ContactServiceConfig {
        from: "Agro Export <noreply@agro.example>".to_string(),
        to: vec!["sales@agro.example".to_string()],
        site_name: "Agro Export".to_string(),
    }
}

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Budi Santoso".to_string(),
        email: "budi@buyer.example".to_string(),
        company: Some("PT Buyer".to_string()),
        phone: Some("  ".to_string()),
        product: None,
        message: "We need 20 tons of <robusta> beans.\n\nPlease quote FOB.".to_string(),
    }
}

#[tokio::test]
async fn test_submit_delivers_message() {
    let transport = MockTransport::new(false);
    let service = ContactService::new(transport.clone(), config());

    let receipt = service.submit(&submission()).await.unwrap();
    assert_eq!(receipt.id, "msg-1");

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(message.subject, "New inquiry from Budi Santoso");
    assert_eq!(message.to, vec!["sales@agro.example"]);
    assert_eq!(message.reply_to.as_deref(), Some("budi@buyer.example"));
}

#[tokio::test]
async fn test_submit_returns_transport_error() {
    let service = ContactService::new(MockTransport::new(true), config());

    let err = service.submit(&submission()).await.unwrap_err();
    assert_eq!(err.reason(), "connection refused");
}

#[test]
fn test_message_bodies_escape_and_skip_blank_fields() {
    let service = ContactService::new(MockTransport::new(false), config());
    let message = service.build_message(&submission()).unwrap();

    assert!(message.html.contains("&lt;robusta&gt;"));
    assert!(!message.html.contains("<robusta>"));
    assert!(message.html.contains("<td>PT Buyer</td>"));
    assert!(!message.text.contains("Phone:"));
    assert!(message.text.contains("Company: PT Buyer"));
    assert!(message.text.contains("Please quote FOB."));
}

#[test]
fn test_subject_mentions_product() {
    let service = ContactService::new(MockTransport::new(false), config());
    let mut submission = submission();
    submission.product = Some("Robusta Coffee".to_string());

    let message = service.build_message(&submission).unwrap();
    assert_eq!(message.subject, "New inquiry from Budi Santoso about Robusta Coffee");
}

#[test]
fn test_header_injection_is_rejected() {
    let service = ContactService::new(MockTransport::new(false), config());
    let mut submission = submission();
    submission.name = "Budi\r\nBcc: everyone@example.com".to_string();

    assert!(matches!(
        service.build_message(&submission),
        Err(EmailError::InvalidMessage { .. })
    ));
}

#[test]
fn test_line_break_in_product_is_rejected() {
    let service = ContactService::new(MockTransport::new(false), config());
    let mut submission = submission();
    submission.product = Some("Robusta\nBcc: everyone@example.com".to_string());

    assert!(matches!(
        service.build_message(&submission),
        Err(EmailError::InvalidMessage { .. })
    ));
}

#[test]
fn test_missing_recipient_is_rejected() {
    let service = ContactService::new(
        MockTransport::new(false),
        ContactServiceConfig {
            to: Vec::new(),
            ..config()
        },
    );
    assert!(service.build_message(&submission()).is_err());
}
