//! `POST /api/contact`

use actix_web::{web, HttpResponse};
use agro_infra::email::mask_email;
use agro_shared::ApiResponse;
use validator::Validate;

use crate::dto::{ContactRequest, ContactResponse};
use crate::handlers::ApiError;
use crate::state::AppState;

/// Validate a contact inquiry and deliver it to the sales inbox.
///
/// Responds 200 with the provider message id, 400 when a field is invalid
/// and 502 when the email provider refuses or cannot be reached. Delivery is
/// attempted once; the submitter decides whether to retry.
pub async fn submit_contact(
    state: web::Data<AppState>,
    request: web::Json<ContactRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner().normalized();

    if let Err(errors) = request.validate() {
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        tracing::warn!(
            fields = ?fields,
            event = "contact_rejected",
            "Contact submission failed validation"
        );
        return Err(errors.into());
    }

    tracing::info!(
        email = %mask_email(&request.email),
        product = request.product.as_deref().unwrap_or("-"),
        event = "contact_received",
        "Contact submission received"
    );

    let receipt = state.contact.submit(&request.into_submission()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ContactResponse { id: receipt.id })))
}
