use serde_json::{json, Value};

use crate::database::about::AboutRepository;
use crate::database::manager::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/about - About-page content; an empty default until first
/// authored so the public site always has something to render
pub async fn get() -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let about = AboutRepository::new(pool).get().await?;

    let data = match about {
        Some(content) => serde_json::to_value(content).unwrap_or_else(|_| json!({})),
        None => json!({
            "description": "",
            "mission": "",
            "vision": "",
            "values": "",
            "leadership": [],
        }),
    };

    Ok(ApiResponse::success(data))
}
