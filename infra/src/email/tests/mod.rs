//! Tests for the email transports

mod smtp_tests;
