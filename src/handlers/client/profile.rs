use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::password;
use crate::database::clients::{ClientChanges, ClientRepository};
use crate::database::is_unique_violation;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::handlers::validate::{validate_email_format, validate_password, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult, ValidatedClient};

use super::utils::session_payload;

/// GET /api/clients/auth/me - Profile of the authenticated account
pub async fn me(Extension(client): Extension<ValidatedClient>) -> ApiResult<ValidatedClient> {
    Ok(ApiResponse::success(client))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
}

/// PUT /api/clients/auth/profile - Partial profile update. Changing the
/// password reissues the session token.
pub async fn update_profile(
    Extension(client): Extension<ValidatedClient>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Value> {
    let mut fields = FieldErrors::new();
    if let Some(email) = payload.email.as_deref() {
        fields.check("email", validate_email_format(email));
    }
    if let Some(pw) = payload.password.as_deref() {
        fields.check("password", validate_password(pw));
    }
    fields.into_result()?;

    let password_changed = payload.password.is_some();
    let password_hash = match payload.password.as_deref() {
        Some(pw) => Some(password::hash_password(pw).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to update profile")
        })?),
        None => None,
    };

    let pool = DatabaseManager::pool().await?;
    let repository = ClientRepository::new(pool);

    let updated = repository
        .update(
            client.id,
            ClientChanges {
                name: payload.name,
                email: payload.email.map(|e| e.trim().to_lowercase()),
                password_hash,
                phone: payload.phone,
                company: payload.company,
                address: payload.address,
                status: None,
            },
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("An account with this email already exists")
            } else {
                e.into()
            }
        })?;

    if password_changed {
        // Old tokens stay valid until expiry (stateless); hand back a fresh
        // one so the caller can swap immediately
        tracing::info!("Password changed for {}", updated.email);
        Ok(ApiResponse::success(session_payload(&updated)?))
    } else {
        let profile = serde_json::to_value(&updated).map_err(|e| {
            tracing::error!("Failed to serialize account profile: {}", e);
            ApiError::internal_server_error("Failed to build profile response")
        })?;
        Ok(ApiResponse::success(profile))
    }
}
