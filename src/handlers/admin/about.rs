use axum::Json;
use serde::Deserialize;

use crate::database::about::AboutRepository;
use crate::database::manager::DatabaseManager;
use crate::database::models::about::{AboutContent, Leader};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct AboutRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default, rename = "values")]
    pub core_values: String,
    #[serde(default)]
    pub leadership: Vec<Leader>,
}

/// PUT /api/about - Replace the about-page content wholesale
pub async fn update(Json(payload): Json<AboutRequest>) -> ApiResult<AboutContent> {
    let pool = DatabaseManager::pool().await?;
    let about = AboutRepository::new(pool)
        .upsert(
            &payload.description,
            &payload.mission,
            &payload.vision,
            &payload.core_values,
            payload.leadership,
        )
        .await?;
    Ok(ApiResponse::success(about))
}
