//! Sanity client tests against a local HTTP server

use agro_core::{ContentQuery, ContentStore, ContentStoreError, EntityKind};
use agro_shared::{ContentStoreConfig, Locale};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::cms::sanity_client::error_description;
use crate::cms::SanityClient;

const QUERY_PATH: &str = "/v2024-01-01/data/query/production";

fn client_for(server: &MockServer) -> SanityClient {
    let config = ContentStoreConfig::new("test", "production").with_api_host(server.uri());
    SanityClient::new(config).unwrap()
}

#[test]
fn test_default_query_url_uses_cdn() {
    let client = SanityClient::new(ContentStoreConfig::new("abc123", "production")).unwrap();
    assert_eq!(
        client.query_url(),
        "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
    );
}

#[tokio::test]
async fn test_query_sends_json_encoded_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("$slug", "\"vanilla\""))
        .and(query_param("$locale", "\"id\""))
        .and(query_param("$defaultLocale", "\"en\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ms": 4,
            "query": "*",
            "result": { "_id": "p-1", "slug": "vanilla", "name": "Vanili" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = ContentQuery::by_slug(EntityKind::Product, "vanilla").to_groq(Locale::Indonesian);

    let result = client.query(&query).await.unwrap();
    assert_eq!(result["name"], "Vanili");
}

#[tokio::test]
async fn test_missing_document_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": null })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = ContentQuery::by_slug(EntityKind::Product, "nonexistent-slug").to_groq(Locale::English);

    assert!(client.query(&query).await.unwrap().is_null());
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ContentStoreConfig::new("test", "production").with_api_host(server.uri());
    config.token = Some("secret-token".to_string());
    let client = SanityClient::new(config).unwrap();

    let query = ContentQuery::list(EntityKind::Article).to_groq(Locale::English);
    assert_eq!(client.query(&query).await.unwrap(), json!([]));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "description": "expected '}' following object body", "type": "queryParseError" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = ContentQuery::list(EntityKind::Product).to_groq(Locale::English);

    let err = client.query(&query).await.unwrap_err();
    assert_eq!(
        err,
        ContentStoreError::Status {
            status: 400,
            message: "expected '}' following object body".to_string(),
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = ContentQuery::list(EntityKind::Category).to_groq(Locale::English);

    assert!(matches!(
        client.query(&query).await,
        Err(ContentStoreError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let config = ContentStoreConfig::new("test", "production").with_api_host("http://127.0.0.1:9");
    let client = SanityClient::new(config).unwrap();
    let query = ContentQuery::list(EntityKind::Product).to_groq(Locale::English);

    assert!(matches!(
        client.query(&query).await,
        Err(ContentStoreError::Transport { .. })
    ));
}

#[tokio::test]
async fn test_long_query_is_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_partial_json(json!({ "params": { "locale": "en" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut query = ContentQuery::list(EntityKind::Product).to_groq(Locale::English);
    query.query.push_str(&" ".repeat(11_000));

    assert_eq!(client.query(&query).await.unwrap(), json!([]));
}

#[test]
fn test_error_description_fallbacks() {
    assert_eq!(
        error_description(StatusCode::UNAUTHORIZED, r#"{"message":"Unauthorized - no token"}"#),
        "Unauthorized - no token"
    );
    assert_eq!(error_description(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    assert_eq!(error_description(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
}
