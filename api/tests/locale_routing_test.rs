//! Locale redirects, reserved paths and fallbacks through the full app

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use agro_api::create_app;

#[actix_web::test]
async fn test_unprefixed_path_redirects_to_negotiated_locale() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/about")
        .insert_header((header::ACCEPT_LANGUAGE, "id;q=0.9, en;q=0.8"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/id/about");
    assert_eq!(resp.headers().get(header::VARY).unwrap(), "Accept-Language");
}

#[actix_web::test]
async fn test_root_without_header_redirects_to_default_locale() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/en");
}

#[actix_web::test]
async fn test_redirect_keeps_query_string() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/products?category=coffee")
        .insert_header((header::ACCEPT_LANGUAGE, "fr-FR, en;q=0.5"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/en/products?category=coffee"
    );
}

#[actix_web::test]
async fn test_trailing_slash_is_normalized() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/id/about/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_LANGUAGE).unwrap(), "id");
}

#[actix_web::test]
async fn test_reserved_paths_are_not_redirected() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for uri in ["/api/unknown", "/favicon.ico", "/assets/logo.svg"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        assert!(resp.headers().get(header::LOCATION).is_none(), "{}", uri);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }
}

#[actix_web::test]
async fn test_unknown_localized_path_renders_not_found_page() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/id/shipping").to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<html lang=\"id\">"));
    assert!(body.contains("Halaman tidak ditemukan"));
    assert!(body.contains("hreflang=\"en\" href=\"/en/shipping\""));
    assert!(!body.contains("/en/id/"));
}

#[actix_web::test]
async fn test_security_headers_are_set() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/en").to_request()).await;

    assert_eq!(resp.headers().get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(resp.headers().get("X-Frame-Options").unwrap(), "DENY");
}
