use axum::{extract::Path, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::contacts::ContactRepository;
use crate::database::manager::DatabaseManager;
use crate::database::models::contact::{Contact, STATUSES};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/contacts - All contact submissions for the back-office inbox
pub async fn list() -> ApiResult<Vec<Contact>> {
    let pool = DatabaseManager::pool().await?;
    let contacts = ContactRepository::new(pool).list().await?;
    Ok(ApiResponse::success(contacts))
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    pub status: String,
}

/// PUT /api/contacts/:id - Move a submission between new/read/replied
pub async fn update(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactRequest>,
) -> ApiResult<Contact> {
    if !STATUSES.contains(&payload.status.as_str()) {
        return Err(ApiError::bad_request(format!(
            "Status must be one of: {}",
            STATUSES.join(", ")
        )));
    }

    let pool = DatabaseManager::pool().await?;
    let contact = ContactRepository::new(pool)
        .update_status(id, &payload.status)
        .await?;
    Ok(ApiResponse::success(contact))
}

/// DELETE /api/contacts/:id - Remove a submission
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    ContactRepository::new(pool).delete(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
