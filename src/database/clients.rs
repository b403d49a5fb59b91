use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::client::{AccountRole, Client};

const COLUMNS: &str =
    "id, name, email, password_hash, phone, company, address, role, status, created_at, updated_at";

/// Fields required to create an account. The password arrives already
/// hashed; this layer never sees plaintext secrets.
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub role: AccountRole,
    pub status: String,
}

/// Partial profile update. `None` keeps the stored value.
#[derive(Default)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
}

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Client>, DatabaseError> {
        let sql = format!("SELECT {} FROM clients WHERE email = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Client>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, DatabaseError> {
        let sql = format!("SELECT {} FROM clients WHERE id = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list(&self) -> Result<Vec<Client>, DatabaseError> {
        let sql = format!("SELECT {} FROM clients ORDER BY created_at DESC", COLUMNS);
        Ok(sqlx::query_as::<_, Client>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn insert(&self, new: NewClient) -> Result<Client, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO clients (id, name, email, password_hash, phone, company, address, role, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Client>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(&new.phone)
            .bind(&new.company)
            .bind(&new.address)
            .bind(new.role.as_str())
            .bind(&new.status)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Apply a partial update, bumping updated_at. Returns the fresh row or
    /// NotFound when the account is gone.
    pub async fn update(&self, id: Uuid, changes: ClientChanges) -> Result<Client, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                phone = COALESCE($5, phone),
                company = COALESCE($6, company),
                address = COALESCE($7, address),
                status = COALESCE($8, status),
                updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(changes.phone)
            .bind(changes.company)
            .bind(changes.address)
            .bind(changes.status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Account not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Account not found".to_string()));
        }
        Ok(())
    }
}
