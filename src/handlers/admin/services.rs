use axum::{extract::Path, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::service::Service;
use crate::database::services::ServiceRepository;
use crate::handlers::validate::{require_non_empty, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ServiceRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        let mut fields = FieldErrors::new();
        fields.check("title", require_non_empty(&self.title, "Title"));
        fields.into_result()
    }
}

/// POST /api/services - Create a service entry
pub async fn create(Json(payload): Json<ServiceRequest>) -> ApiResult<Service> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let service = ServiceRepository::new(pool)
        .insert(&payload.icon, payload.title.trim(), payload.description.trim())
        .await?;

    Ok(ApiResponse::created(service))
}

/// PUT /api/services/:id - Update a service entry
pub async fn update(
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceRequest>,
) -> ApiResult<Service> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let service = ServiceRepository::new(pool)
        .update(id, &payload.icon, payload.title.trim(), payload.description.trim())
        .await?;

    Ok(ApiResponse::success(service))
}

/// DELETE /api/services/:id - Remove a service entry
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    ServiceRepository::new(pool).delete(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
