use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::password;
use crate::database::clients::{ClientRepository, NewClient};
use crate::database::manager::DatabaseManager;
use crate::database::models::client::{AccountRole, STATUS_ACTIVE};
use crate::database::is_unique_violation;
use crate::error::ApiError;
use crate::handlers::validate::{require_non_empty, validate_email_format, validate_password, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::session_payload;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
}

/// POST /api/clients/auth/signup - Create a client account and log it in
pub async fn signup(Json(payload): Json<SignupRequest>) -> ApiResult<Value> {
    let mut fields = FieldErrors::new();
    fields.check("name", require_non_empty(&payload.name, "Name"));
    fields.check("email", validate_email_format(&payload.email));
    fields.check("password", validate_password(&payload.password));
    fields.into_result()?;

    let password_hash = password::hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to create account")
    })?;

    let pool = DatabaseManager::pool().await?;
    let repository = ClientRepository::new(pool);

    let client = repository
        .insert(NewClient {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            password_hash,
            phone: payload.phone.trim().to_string(),
            company: payload.company.trim().to_string(),
            address: String::new(),
            role: AccountRole::Client,
            status: STATUS_ACTIVE.to_string(),
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("An account with this email already exists")
            } else {
                e.into()
            }
        })?;

    tracing::info!("New client account: {}", client.email);
    Ok(ApiResponse::created(session_payload(&client)?))
}
