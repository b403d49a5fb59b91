use axum::Json;
use serde::Deserialize;

use crate::database::contacts::ContactRepository;
use crate::database::manager::DatabaseManager;
use crate::database::models::contact::Contact;
use crate::handlers::validate::{require_non_empty, validate_email_format, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/contacts - Contact-form submission from the public site
pub async fn submit(Json(payload): Json<ContactRequest>) -> ApiResult<Contact> {
    let mut fields = FieldErrors::new();
    fields.check("name", require_non_empty(&payload.name, "Name"));
    fields.check("email", validate_email_format(&payload.email));
    fields.check("message", require_non_empty(&payload.message, "Message"));
    fields.into_result()?;

    let pool = DatabaseManager::pool().await?;
    let contact = ContactRepository::new(pool)
        .insert(payload.name.trim(), payload.email.trim(), payload.message.trim())
        .await?;

    tracing::info!("Contact submission from {}", contact.email);
    Ok(ApiResponse::created(contact))
}
