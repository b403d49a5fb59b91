use axum::{extract::Path, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::password;
use crate::database::clients::{ClientChanges, ClientRepository, NewClient};
use crate::database::is_unique_violation;
use crate::database::manager::DatabaseManager;
use crate::database::models::client::{AccountRole, Client, STATUS_ACTIVE, STATUS_INACTIVE};
use crate::error::ApiError;
use crate::handlers::validate::{require_non_empty, validate_email_format, validate_password, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/clients - All client accounts for the back-office table
pub async fn list() -> ApiResult<Vec<Client>> {
    let pool = DatabaseManager::pool().await?;
    let clients = ClientRepository::new(pool).list().await?;
    Ok(ApiResponse::success(clients))
}

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

fn validate_status(status: &str) -> Result<(), String> {
    if status == STATUS_ACTIVE || status == STATUS_INACTIVE {
        Ok(())
    } else {
        Err(format!("Status must be '{}' or '{}'", STATUS_ACTIVE, STATUS_INACTIVE))
    }
}

/// POST /api/clients - Provision a client account from the back-office
pub async fn create(Json(payload): Json<CreateClientRequest>) -> ApiResult<Client> {
    let mut fields = FieldErrors::new();
    fields.check("name", require_non_empty(&payload.name, "Name"));
    fields.check("email", validate_email_format(&payload.email));
    fields.check("password", validate_password(&payload.password));
    fields.check("status", validate_status(&payload.status));
    fields.into_result()?;

    let password_hash = password::hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to create account")
    })?;

    let pool = DatabaseManager::pool().await?;
    let client = ClientRepository::new(pool)
        .insert(NewClient {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            password_hash,
            phone: payload.phone,
            company: payload.company,
            address: payload.address,
            role: AccountRole::Client,
            status: payload.status,
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("An account with this email already exists")
            } else {
                e.into()
            }
        })?;

    Ok(ApiResponse::created(client))
}

#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    /// Present resets the account's password
    pub password: Option<String>,
}

/// PUT /api/clients/:id - Update a client account from the back-office
pub async fn update(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientRequest>,
) -> ApiResult<Client> {
    let mut fields = FieldErrors::new();
    if let Some(email) = payload.email.as_deref() {
        fields.check("email", validate_email_format(email));
    }
    if let Some(pw) = payload.password.as_deref() {
        fields.check("password", validate_password(pw));
    }
    if let Some(status) = payload.status.as_deref() {
        fields.check("status", validate_status(status));
    }
    fields.into_result()?;

    let password_hash = match payload.password.as_deref() {
        Some(pw) => Some(password::hash_password(pw).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to update account")
        })?),
        None => None,
    };

    let pool = DatabaseManager::pool().await?;
    let client = ClientRepository::new(pool)
        .update(
            id,
            ClientChanges {
                name: payload.name,
                email: payload.email.map(|e| e.trim().to_lowercase()),
                password_hash,
                phone: payload.phone,
                company: payload.company,
                address: payload.address,
                status: payload.status,
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

    Ok(ApiResponse::success(client))
}

/// DELETE /api/clients/:id - Remove a client account. Outstanding tokens
/// die at their next validation.
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    ClientRepository::new(pool).delete(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
