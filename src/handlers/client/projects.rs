use axum::Extension;

use crate::database::manager::DatabaseManager;
use crate::database::models::project::Project;
use crate::database::projects::ProjectRepository;
use crate::middleware::{ApiResponse, ApiResult, ValidatedClient};

/// GET /api/projects/my - Projects owned by the authenticated account
pub async fn my_projects(
    Extension(client): Extension<ValidatedClient>,
) -> ApiResult<Vec<Project>> {
    let pool = DatabaseManager::pool().await?;
    let projects = ProjectRepository::new(pool).list_owned(client.id).await?;
    Ok(ApiResponse::success(projects))
}
