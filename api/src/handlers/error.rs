//! Mapping from request and domain failures to JSON error responses

use std::collections::HashMap;

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use agro_core::{DomainError, EmailError};
use agro_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Errors returned by the JSON endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No route for {0}")]
    NotFound(String),

    #[error("Email delivery failed: {0}")]
    EmailDelivery(#[from] EmailError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => error_codes::VALIDATION_ERROR,
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::NotFound(_) => error_codes::NOT_FOUND,
            ApiError::EmailDelivery(EmailError::InvalidMessage { .. }) => error_codes::VALIDATION_ERROR,
            ApiError::EmailDelivery(_) => error_codes::EMAIL_DELIVERY_FAILED,
            ApiError::Domain(e) if e.is_configuration() => error_codes::CONFIGURATION_ERROR,
            ApiError::Domain(DomainError::NotFound { .. }) => error_codes::NOT_FOUND,
            ApiError::Domain(DomainError::Validation { .. }) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(_) => error_codes::INTERNAL_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(errors) => {
                ErrorResponse::new(self.code(), "Invalid request data. Please check the highlighted fields.")
                    .add_detail("fields", validation_details(errors))
            }
            ApiError::EmailDelivery(e) => ErrorResponse::new(
                self.code(),
                format!("We could not send your message: {}", e.reason()),
            )
            .add_detail("reason", e.reason()),
            // Internal details stay in the logs
            ApiError::Domain(e) if self.status_code().is_server_error() => {
                tracing::error!(error = %e, event = "request_failed", "Request failed");
                ErrorResponse::new(self.code(), "The server could not complete the request")
            }
            other => ErrorResponse::new(self.code(), other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::EmailDelivery(EmailError::InvalidMessage { .. }) => StatusCode::BAD_REQUEST,
            ApiError::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Validation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Field name to messages, falling back to the validator code when a rule
/// has no message
pub fn validation_details(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    let mut fields = HashMap::new();
    for (field, errors) in errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()))
            .collect();
        fields.insert(field.to_string(), messages);
    }
    fields
}

/// Malformed or oversized JSON bodies become 400 responses in the API format
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(
        path = %req.path(),
        error = %err,
        event = "invalid_json_body",
        "Rejected request body"
    );
    ApiError::BadRequest(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use agro_core::DictionaryError;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    async fn json_body(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_validation_error_lists_fields() {
        let errors = Probe {
            name: "a".to_string(),
            email: "nope".to_string(),
        }
        .validate()
        .unwrap_err();

        let (status, body) = json_body(ApiError::from(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"]["name"][0], "too short");
        assert_eq!(body["details"]["fields"]["email"][0], "email");
    }

    #[actix_web::test]
    async fn test_email_failure_is_bad_gateway_with_reason() {
        let error = EmailError::Rejected {
            provider: "resend".to_string(),
            status: 422,
            reason: "domain not verified".to_string(),
        };

        let (status, body) = json_body(ApiError::from(error)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "EMAIL_DELIVERY_FAILED");
        assert_eq!(body["details"]["reason"], "domain not verified");
    }

    #[actix_web::test]
    async fn test_invalid_message_is_client_error() {
        let error = EmailError::InvalidMessage {
            reason: "header injection".to_string(),
        };
        assert_eq!(ApiError::from(error).status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_configuration_error_hides_details() {
        let error = DomainError::from(DictionaryError::DefaultUnavailable {
            locale: "en".to_string(),
            reason: "/etc/agro/en.json: permission denied".to_string(),
        });

        let (status, body) = json_body(ApiError::from(error)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "CONFIGURATION_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("permission"));
    }
}
