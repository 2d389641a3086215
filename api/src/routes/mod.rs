//! Route handlers

pub mod contact;
pub mod health;
pub mod pages;

use actix_web::{web, HttpRequest, HttpResponse};
use agro_core::is_reserved_path;

use crate::handlers::ApiError;
use crate::middleware::RequestLocale;
use crate::state::AppState;

/// JSON endpoints under `/api`
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health))
            .route("/contact", web::post().to(contact::submit_contact)),
    );
}

/// Fallback for unmatched requests: JSON for API and asset paths, the
/// localized not-found page for everything else
pub async fn not_found(
    req: HttpRequest,
    state: web::Data<AppState>,
    locale: RequestLocale,
) -> Result<HttpResponse, ApiError> {
    if is_reserved_path(req.path()) {
        return Err(ApiError::NotFound(req.path().to_string()));
    }
    pages::not_found_page(&state, locale.0, req.path()).await
}
