//! Contact and health endpoints

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use agro_api::create_app;
use agro_infra::email::MockEmailTransport;
use serde_json::json;

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Siti Rahma",
        "email": "siti@example.com",
        "company": "Rahma Trading",
        "product": "Arabica Coffee",
        "message": "Please quote 2 tonnes of green beans, FOB Belawan."
    })
}

#[actix_web::test]
async fn test_contact_submission_is_delivered() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(valid_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["id"].as_str().unwrap().starts_with("mock-"));

    assert_eq!(ctx.email.get_message_count(), 1);
    let sent = ctx.email.sent_messages().await;
    assert_eq!(sent[0].to, vec!["sales@agro.example".to_string()]);
    assert_eq!(sent[0].reply_to.as_deref(), Some("siti@example.com"));
}

#[actix_web::test]
async fn test_provider_failure_is_bad_gateway() {
    let ctx = common::context_with(common::catalog(), MockEmailTransport::failing());
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(valid_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "EMAIL_DELIVERY_FAILED");
    assert_eq!(body["details"]["reason"], "simulated delivery failure");
}

#[actix_web::test]
async fn test_line_break_in_product_is_rejected() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let mut body = valid_body();
    body["product"] = json!("Arabica\r\nBcc: everyone@example.com");
    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(ctx.email.get_message_count(), 0);
}

#[actix_web::test]
async fn test_invalid_submission_is_rejected_before_delivery() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": " ", "email": "nope", "message": "hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    for field in ["name", "email", "message"] {
        assert!(body["details"]["fields"][field].is_array(), "{}", field);
    }
    assert_eq!(ctx.email.get_message_count(), 0);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_health_reports_components() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["email"], "mock");
}

#[actix_web::test]
async fn test_health_is_degraded_when_cache_is_unreachable() {
    let ctx = common::context_with_unreachable_cache();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["cache"], "unreachable");
}
