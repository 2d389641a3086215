//! Page rendering through the HTTP layer

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use agro_api::create_app;
use agro_infra::email::MockEmailTransport;

async fn get(ctx: &common::TestContext, uri: &str) -> (StatusCode, String) {
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = resp.status();
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    (status, body)
}

#[actix_web::test]
async fn test_home_page_is_html() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/en").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(resp.headers().get(header::CONTENT_LANGUAGE).unwrap(), "en");

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Arabica Coffee"));
    assert!(body.contains("Harvest report"));
}

#[actix_web::test]
async fn test_product_detail_in_indonesian() {
    let ctx = common::context();
    let (status, body) = get(&ctx, "/id/products/arabica-coffee").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Minta penawaran"));
    assert!(body.contains("Produk terkait"));
    assert!(body.contains("Robusta Coffee"));
}

#[actix_web::test]
async fn test_missing_product_is_localized_404() {
    let ctx = common::context();
    let (status, body) = get(&ctx, "/en/products/nonexistent-slug").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("We couldn&#x27;t find that page"));
    assert!(body.contains("noindex"));
}

#[actix_web::test]
async fn test_malformed_slug_is_404_without_lookup() {
    let ctx = common::context();
    let (status, body) = get(&ctx, "/en/blog/Not_A_Slug").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<html lang=\"en\">"));
}

#[actix_web::test]
async fn test_malformed_slug_404_links_to_same_path_in_other_locale() {
    let ctx = common::context();
    let (status, body) = get(&ctx, "/en/products/Not_A_Slug").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("hreflang=\"id\" href=\"/id/products/Not_A_Slug\""));
    assert!(!body.contains("/id/en/"));
}

#[actix_web::test]
async fn test_related_failure_keeps_product_page() {
    let ctx = common::context_with(
        common::catalog().failing_on_param("relatedTo"),
        MockEmailTransport::new(),
    );
    let (status, body) = get(&ctx, "/en/products/arabica-coffee").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Arabica Coffee"));
    assert!(!body.contains("Related products"));
}

#[actix_web::test]
async fn test_article_detail() {
    let ctx = common::context();
    let (status, body) = get(&ctx, "/en/blog/harvest-report").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Harvest report"));
}

#[actix_web::test]
async fn test_invalid_category_filter_shows_full_catalog() {
    let ctx = common::context();
    let (status, body) = get(&ctx, "/en/products?category=%3Cscript%3E").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Robusta Coffee"));
    assert!(!body.contains("<script>"));
}

#[actix_web::test]
async fn test_pages_render_when_cache_is_unreachable() {
    let ctx = common::context_with_unreachable_cache();
    let (status, body) = get(&ctx, "/en/products/arabica-coffee").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Arabica Coffee"));
}
