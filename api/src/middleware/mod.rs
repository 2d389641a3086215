//! Request middleware

pub mod locale;

use actix_web::middleware::DefaultHeaders;

pub use locale::{LocaleRouting, RequestLocale};

/// Security headers added to every response
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
        .add(("X-XSS-Protection", "1; mode=block"))
}
