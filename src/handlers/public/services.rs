use crate::database::manager::DatabaseManager;
use crate::database::services::ServiceRepository;
use crate::middleware::{ApiResponse, ApiResult};
use serde_json::{json, Value};

/// GET /api/services - List services shown on the marketing site
pub async fn list() -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let services = ServiceRepository::new(pool).list().await?;

    // Attach the resolved icon tag so stale records render the fallback
    let data: Vec<Value> = services
        .iter()
        .map(|s| {
            json!({
                "id": s.id,
                "icon": s.icon().tag(),
                "title": s.title,
                "description": s.description,
                "created_at": s.created_at,
            })
        })
        .collect();

    Ok(ApiResponse::success(json!(data)))
}
