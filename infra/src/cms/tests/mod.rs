//! Tests for the CMS clients

mod sanity_client_tests;
