use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::contact::Contact;

const COLUMNS: &str = "id, name, email, message, status, created_at";

pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Contact>, DatabaseError> {
        let sql = format!("SELECT {} FROM contacts ORDER BY created_at DESC", COLUMNS);
        Ok(sqlx::query_as::<_, Contact>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Contact, DatabaseError> {
        let sql = format!(
            "INSERT INTO contacts (id, name, email, message) VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Contact>(&sql)
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(email)
            .bind(message)
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Contact, DatabaseError> {
        let sql = format!(
            "UPDATE contacts SET status = $2 WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Contact not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Contact not found".to_string()));
        }
        Ok(())
    }
}
