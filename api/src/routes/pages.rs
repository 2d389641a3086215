//! Localized HTML pages under `/{locale}`

use actix_web::{
    guard,
    http::{
        header::{self, ContentType},
        StatusCode,
    },
    web, HttpRequest, HttpResponse,
};
use agro_core::{locale_from_path, strip_locale, PageOutcome, PageTemplate, RenderedPage};
use agro_shared::validation::is_valid_slug;
use agro_shared::Locale;
use serde::Deserialize;

use crate::handlers::ApiError;
use crate::middleware::RequestLocale;
use crate::state::AppState;

/// Register the page tree. Only paths whose first segment is a supported
/// locale enter the scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/{locale}")
            .guard(guard::fn_guard(|ctx| locale_from_path(ctx.head().uri.path()).is_some()))
            .route("", web::get().to(home))
            .route("/about", web::get().to(about))
            .route("/products", web::get().to(products))
            .route("/products/{slug}", web::get().to(product_detail))
            .route("/blog", web::get().to(blog))
            .route("/blog/{slug}", web::get().to(article_detail))
            .route("/contact", web::get().to(contact)),
    );
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

async fn home(state: web::Data<AppState>, locale: RequestLocale) -> Result<HttpResponse, ApiError> {
    render(&state, locale.0, PageTemplate::Home).await
}

async fn about(state: web::Data<AppState>, locale: RequestLocale) -> Result<HttpResponse, ApiError> {
    render(&state, locale.0, PageTemplate::About).await
}

async fn products(
    state: web::Data<AppState>,
    locale: RequestLocale,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, ApiError> {
    // An unusable filter shows the whole catalog
    let category = query.into_inner().category.filter(|c| is_valid_slug(c));
    render(&state, locale.0, PageTemplate::Products { category }).await
}

async fn product_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    locale: RequestLocale,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (_, slug) = path.into_inner();
    if !is_valid_slug(&slug) {
        return not_found_page(&state, locale.0, req.path()).await;
    }
    render(&state, locale.0, PageTemplate::ProductDetail { slug }).await
}

async fn blog(state: web::Data<AppState>, locale: RequestLocale) -> Result<HttpResponse, ApiError> {
    render(&state, locale.0, PageTemplate::Blog).await
}

async fn article_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    locale: RequestLocale,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (_, slug) = path.into_inner();
    if !is_valid_slug(&slug) {
        return not_found_page(&state, locale.0, req.path()).await;
    }
    render(&state, locale.0, PageTemplate::ArticleDetail { slug }).await
}

async fn contact(state: web::Data<AppState>, locale: RequestLocale) -> Result<HttpResponse, ApiError> {
    render(&state, locale.0, PageTemplate::Contact).await
}

async fn render(state: &AppState, locale: Locale, template: PageTemplate) -> Result<HttpResponse, ApiError> {
    let outcome = state.pages.render(locale, template).await?;
    Ok(match outcome {
        PageOutcome::Rendered(page) => html_response(StatusCode::OK, page),
        PageOutcome::NotFound(page) => html_response(StatusCode::NOT_FOUND, page),
    })
}

/// Localized 404 page for a request path, with or without its locale prefix
pub(crate) async fn not_found_page(
    state: &AppState,
    locale: Locale,
    request_path: &str,
) -> Result<HttpResponse, ApiError> {
    // The page links are re-prefixed per locale when rendered
    let page = state.pages.render_not_found(locale, strip_locale(request_path)).await?;
    Ok(html_response(StatusCode::NOT_FOUND, page))
}

fn html_response(status: StatusCode, page: RenderedPage) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((header::CONTENT_LANGUAGE, page.locale.code()))
        .body(page.html)
}
