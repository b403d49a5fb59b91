use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::project::Project;
use crate::database::Scope;

const COLUMNS: &str = "id, title, description, image_url, technologies, status, progress, \
                       start_date, end_date, client_id, created_at, updated_at";

pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub technologies: Vec<String>,
    pub status: String,
    pub progress: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub client_id: Option<Uuid>,
}

pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List projects visible in the given scope, newest first.
    pub async fn list(&self, scope: Scope) -> Result<Vec<Project>, DatabaseError> {
        let rows = match scope {
            Scope::Public => {
                let sql = format!(
                    "SELECT {} FROM projects WHERE client_id IS NULL ORDER BY created_at DESC",
                    COLUMNS
                );
                sqlx::query_as::<_, Project>(&sql).fetch_all(&self.pool).await?
            }
            Scope::Client(id) => {
                let sql = format!(
                    "SELECT {} FROM projects WHERE client_id IS NULL OR client_id = $1 \
                     ORDER BY created_at DESC",
                    COLUMNS
                );
                sqlx::query_as::<_, Project>(&sql)
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await?
            }
            Scope::All => {
                let sql = format!("SELECT {} FROM projects ORDER BY created_at DESC", COLUMNS);
                sqlx::query_as::<_, Project>(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(rows)
    }

    /// Projects owned by exactly this account ("my projects" view).
    pub async fn list_owned(&self, client_id: Uuid) -> Result<Vec<Project>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM projects WHERE client_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        let sql = format!("SELECT {} FROM projects WHERE id = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn insert(&self, new: NewProject) -> Result<Project, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO projects
                (id, title, description, image_url, technologies, status, progress,
                 start_date, end_date, client_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Project>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.title)
            .bind(&new.description)
            .bind(&new.image_url)
            .bind(&new.technologies)
            .bind(&new.status)
            .bind(new.progress.clamp(0, 100))
            .bind(new.start_date)
            .bind(new.end_date)
            .bind(new.client_id)
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn update(&self, id: Uuid, new: NewProject) -> Result<Project, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE projects SET
                title = $2, description = $3, image_url = $4, technologies = $5,
                status = $6, progress = $7, start_date = $8, end_date = $9,
                client_id = $10, updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(&new.title)
            .bind(&new.description)
            .bind(&new.image_url)
            .bind(&new.technologies)
            .bind(&new.status)
            .bind(new.progress.clamp(0, 100))
            .bind(new.start_date)
            .bind(new.end_date)
            .bind(new.client_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Project not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
