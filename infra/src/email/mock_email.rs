//! Mock Email Transport
//!
//! Logs messages instead of sending them and keeps them in memory so tests
//! and local development can inspect what would have been delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use agro_core::{DeliveryReceipt, EmailError, EmailMessage, EmailTransport};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use super::mask_email;

/// Mock email transport for development and testing
#[derive(Clone, Default)]
pub struct MockEmailTransport {
    message_count: Arc<AtomicU64>,
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    /// Reject every message (for testing)
    simulate_failure: bool,
}

impl MockEmailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Messages accepted so far
    pub async fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailTransport for MockEmailTransport {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, EmailError> {
        if self.simulate_failure {
            return Err(EmailError::Rejected {
                provider: "mock".to_string(),
                status: 503,
                reason: "simulated delivery failure".to_string(),
            });
        }

        let id = format!("mock-{}", Uuid::new_v4());
        info!(
            id = %id,
            to = %message.to.iter().map(|t| mask_email(t)).collect::<Vec<_>>().join(","),
            subject = %message.subject,
            event = "email_logged",
            "Mock email transport accepted message"
        );
        self.sent.lock().await.push(message.clone());
        self.message_count.fetch_add(1, Ordering::SeqCst);
        Ok(DeliveryReceipt::new(id))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
