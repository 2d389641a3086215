//! Application factory

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::NormalizePath,
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::json_error_handler;
use crate::middleware::{security_headers, LocaleRouting};
use crate::routes;
use crate::state::AppState;

/// Largest accepted JSON body
const JSON_LIMIT_BYTES: usize = 64 * 1024;

/// Build the application with all routes and middleware.
///
/// Middleware runs outermost first: request tracing, security headers,
/// trailing slash removal, then locale routing.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_LIMIT_BYTES)
                .error_handler(json_error_handler),
        )
        .configure(routes::configure_api)
        .configure(routes::pages::configure)
        .default_service(web::route().to(routes::not_found))
        .wrap(LocaleRouting)
        .wrap(NormalizePath::trim())
        .wrap(security_headers())
        .wrap(TracingLogger::default())
}
