//! Contact form request and response bodies

use agro_core::ContactSubmission;
use agro_shared::validation::non_empty_trimmed;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/contact`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(
        email(message = "A valid email address is required"),
        length(max = 254, message = "Email address is too long")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "Company name is too long"))]
    pub company: Option<String>,

    #[serde(default)]
    #[validate(length(max = 40, message = "Phone number is too long"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 150, message = "Product name is too long"))]
    pub product: Option<String>,

    #[validate(length(min = 10, max = 5000, message = "Message must be between 10 and 5000 characters"))]
    pub message: String,
}

impl ContactRequest {
    /// Trim every field; blank optional fields become absent
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: non_empty_trimmed(self.company.as_deref()),
            phone: non_empty_trimmed(self.phone.as_deref()),
            product: non_empty_trimmed(self.product.as_deref()),
            message: self.message.trim().to_string(),
        }
    }

    pub fn into_submission(self) -> ContactSubmission {
        ContactSubmission {
            name: self.name,
            email: self.email,
            company: self.company,
            phone: self.phone,
            product: self.product,
            message: self.message,
        }
    }
}

/// Data of a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    /// Provider message id
    pub id: String,
}
