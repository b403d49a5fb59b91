use axum::extract::Path;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::project::Project;
use crate::database::projects::ProjectRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, MaybeClient};

/// GET /api/projects - Portfolio listing, scoped by the optional identity:
/// anonymous viewers get ownerless rows, clients additionally their own,
/// admins everything.
pub async fn list(maybe: MaybeClient) -> ApiResult<Vec<Project>> {
    let pool = DatabaseManager::pool().await?;
    let projects = ProjectRepository::new(pool).list(maybe.scope()).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /api/projects/:id - Single project, subject to the same scoping
pub async fn get(maybe: MaybeClient, Path(id): Path<Uuid>) -> ApiResult<Project> {
    let pool = DatabaseManager::pool().await?;
    let project = ProjectRepository::new(pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    if !maybe.scope().can_view(project.client_id) {
        return Err(match maybe.0 {
            None => ApiError::unauthorized("Authentication required"),
            Some(_) => ApiError::forbidden("You do not have access to this project"),
        });
    }

    Ok(ApiResponse::success(project))
}
