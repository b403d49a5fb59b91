use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::about::{AboutContent, Leader};

const COLUMNS: &str = "id, description, mission, vision, core_values, leadership, updated_at";

pub struct AboutRepository {
    pool: PgPool,
}

impl AboutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The about page is a singleton; absent means it was never authored.
    pub async fn get(&self) -> Result<Option<AboutContent>, DatabaseError> {
        let sql = format!("SELECT {} FROM about_content LIMIT 1", COLUMNS);
        Ok(sqlx::query_as::<_, AboutContent>(&sql)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Replace the singleton wholesale, creating it on first write.
    pub async fn upsert(
        &self,
        description: &str,
        mission: &str,
        vision: &str,
        core_values: &str,
        leadership: Vec<Leader>,
    ) -> Result<AboutContent, DatabaseError> {
        let existing = self.get().await?;
        let sql = match existing {
            Some(_) => format!(
                r#"
                UPDATE about_content SET
                    description = $2, mission = $3, vision = $4, core_values = $5,
                    leadership = $6, updated_at = now()
                WHERE id = $1
                RETURNING {}
                "#,
                COLUMNS
            ),
            None => format!(
                r#"
                INSERT INTO about_content (id, description, mission, vision, core_values, leadership)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {}
                "#,
                COLUMNS
            ),
        };
        let id = existing.map(|a| a.id).unwrap_or_else(Uuid::new_v4);
        Ok(sqlx::query_as::<_, AboutContent>(&sql)
            .bind(id)
            .bind(description)
            .bind(mission)
            .bind(vision)
            .bind(core_values)
            .bind(Json(leadership))
            .fetch_one(&self.pool)
            .await?)
    }
}
