use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::service::{Service, ServiceIcon};

const COLUMNS: &str = "id, icon, title, description, created_at";

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Service>, DatabaseError> {
        let sql = format!("SELECT {} FROM services ORDER BY created_at ASC", COLUMNS);
        Ok(sqlx::query_as::<_, Service>(&sql).fetch_all(&self.pool).await?)
    }

    /// Icon tags are normalized through the closed variant set on write, so
    /// reads never surface an unrenderable tag.
    pub async fn insert(
        &self,
        icon: &str,
        title: &str,
        description: &str,
    ) -> Result<Service, DatabaseError> {
        let sql = format!(
            "INSERT INTO services (id, icon, title, description) VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Service>(&sql)
            .bind(Uuid::new_v4())
            .bind(ServiceIcon::from_tag(icon).tag())
            .bind(title)
            .bind(description)
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        icon: &str,
        title: &str,
        description: &str,
    ) -> Result<Service, DatabaseError> {
        let sql = format!(
            "UPDATE services SET icon = $2, title = $3, description = $4 WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Service>(&sql)
            .bind(id)
            .bind(ServiceIcon::from_tag(icon).tag())
            .bind(title)
            .bind(description)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Service not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Service not found".to_string()));
        }
        Ok(())
    }
}
