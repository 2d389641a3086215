//! Locale routing middleware.
//!
//! Every request path is classified before it reaches a handler:
//! - reserved paths (API, assets, root files) pass through untouched
//! - paths with a supported locale prefix proceed, with the locale stored in
//!   the request extensions for [`RequestLocale`]
//! - any other path is answered with a temporary redirect to its localized
//!   form, chosen from `Accept-Language`

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{ACCEPT_LANGUAGE, LOCATION, VARY},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use agro_core::{decide_route, locale_from_path, negotiate_header, RouteDecision};
use agro_shared::Locale;
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Locale routing middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleRouting;

impl<S, B> Transform<S, ServiceRequest> for LocaleRouting
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LocaleRoutingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LocaleRoutingService { service }))
    }
}

pub struct LocaleRoutingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for LocaleRoutingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let accept_language = req
                .headers()
                .get(ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok());
            decide_route(req.path(), Some(req.query_string()), accept_language)
        };

        match decision {
            RouteDecision::Bypass => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            RouteDecision::Proceed { locale } => {
                req.extensions_mut().insert(locale);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            RouteDecision::Redirect { location, locale } => {
                tracing::debug!(
                    path = %req.path(),
                    location = %location,
                    locale = %locale,
                    event = "locale_redirect",
                    "Redirecting to localized path"
                );
                let response = HttpResponse::TemporaryRedirect()
                    .insert_header((LOCATION, location))
                    .insert_header((VARY, "Accept-Language"))
                    .finish();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Locale of the current request.
///
/// Set by [`LocaleRouting`] for prefixed paths; otherwise read from the path
/// or negotiated from `Accept-Language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

impl RequestLocale {
    pub fn resolve(req: &HttpRequest) -> Locale {
        if let Some(locale) = req.extensions().get::<Locale>() {
            return *locale;
        }
        locale_from_path(req.path()).unwrap_or_else(|| {
            negotiate_header(req.headers().get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()))
        })
    }
}

impl FromRequest for RequestLocale {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(RequestLocale(Self::resolve(req))))
    }
}
