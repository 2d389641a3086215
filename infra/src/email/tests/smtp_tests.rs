//! SMTP message building tests

use agro_core::{EmailError, EmailMessage};

use crate::email::smtp::build_message;

fn message() -> EmailMessage {
    EmailMessage {
        from: "Agro Export <noreply@agro.example>".to_string(),
        to: vec!["sales@agro.example".to_string(), "ops@agro.example".to_string()],
        reply_to: Some("Budi <budi@example.com>".to_string()),
        subject: "New inquiry from Budi".to_string(),
        html: "<p>Hello</p>".to_string(),
        text: "Hello".to_string(),
    }
}

#[test]
fn test_message_has_both_alternatives() {
    let email = build_message(&message(), "abc-123").unwrap();
    let raw = String::from_utf8(email.formatted()).unwrap();

    assert!(raw.contains("Subject: New inquiry from Budi"));
    assert!(raw.contains("Reply-To: Budi <budi@example.com>"));
    assert!(raw.contains("Message-ID: <abc-123@agro-export>"));
    assert!(raw.contains("multipart/alternative"));
    assert!(raw.contains("text/plain"));
    assert!(raw.contains("text/html"));
}

#[test]
fn test_invalid_address_is_rejected() {
    let mut bad = message();
    bad.reply_to = Some("not an address".to_string());

    assert!(matches!(
        build_message(&bad, "id"),
        Err(EmailError::InvalidMessage { .. })
    ));
}
