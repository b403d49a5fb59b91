use axum::{extract::Path, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::project::Project;
use crate::database::projects::{NewProject, ProjectRepository};
use crate::handlers::validate::{require_non_empty, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub progress: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Owning account; omit for a public portfolio entry
    pub client_id: Option<Uuid>,
}

fn default_status() -> String {
    "Planning".to_string()
}

impl ProjectRequest {
    fn validate(&self) -> Result<(), crate::error::ApiError> {
        let mut fields = FieldErrors::new();
        fields.check("title", require_non_empty(&self.title, "Title"));
        if !(0..=100).contains(&self.progress) {
            fields.check("progress", Err("Progress must be between 0 and 100".to_string()));
        }
        fields.into_result()
    }

    fn into_new(self) -> NewProject {
        NewProject {
            title: self.title.trim().to_string(),
            description: self.description,
            image_url: self.image_url,
            technologies: self.technologies,
            status: self.status,
            progress: self.progress,
            start_date: self.start_date,
            end_date: self.end_date,
            client_id: self.client_id,
        }
    }
}

/// POST /api/projects - Create a project (public portfolio entry or one
/// assigned to a client)
pub async fn create(Json(payload): Json<ProjectRequest>) -> ApiResult<Project> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let project = ProjectRepository::new(pool).insert(payload.into_new()).await?;

    Ok(ApiResponse::created(project))
}

/// PUT /api/projects/:id - Replace a project's fields
pub async fn update(
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectRequest>,
) -> ApiResult<Project> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let project = ProjectRepository::new(pool).update(id, payload.into_new()).await?;

    Ok(ApiResponse::success(project))
}

/// DELETE /api/projects/:id - Remove a project
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    ProjectRepository::new(pool).delete(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
