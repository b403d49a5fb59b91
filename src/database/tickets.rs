use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::ticket::{Ticket, TicketWithClient, STATUS_RESOLVED};

const COLUMNS: &str =
    "id, client_id, subject, content, status, admin_reply, replied_at, created_at";

pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tickets opened by this account, newest first.
    pub async fn list_owned(&self, client_id: Uuid) -> Result<Vec<Ticket>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM tickets WHERE client_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Ticket>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Admin view: every ticket joined with the owning client's identity.
    pub async fn list_all_with_clients(&self) -> Result<Vec<TicketWithClient>, DatabaseError> {
        let sql = r#"
            SELECT t.id, t.client_id, t.subject, t.content, t.status,
                   t.admin_reply, t.replied_at, t.created_at,
                   c.name AS client_name, c.email AS client_email, c.company AS client_company
            FROM tickets t
            JOIN clients c ON c.id = t.client_id
            ORDER BY t.created_at DESC
        "#;
        Ok(sqlx::query_as::<_, TicketWithClient>(sql)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, DatabaseError> {
        let sql = format!("SELECT {} FROM tickets WHERE id = $1", COLUMNS);
        Ok(sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn insert(
        &self,
        client_id: Uuid,
        subject: &str,
        content: &str,
    ) -> Result<Ticket, DatabaseError> {
        let sql = format!(
            "INSERT INTO tickets (id, client_id, subject, content) VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            COLUMNS
        );
        Ok(sqlx::query_as::<_, Ticket>(&sql)
            .bind(Uuid::new_v4())
            .bind(client_id)
            .bind(subject)
            .bind(content)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Record an admin reply, stamping replied_at. Status defaults to
    /// Resolved unless the caller passes another one.
    pub async fn reply(
        &self,
        id: Uuid,
        reply: &str,
        status: Option<&str>,
    ) -> Result<Ticket, DatabaseError> {
        let sql = format!(
            "UPDATE tickets SET admin_reply = $2, status = $3, replied_at = $4 WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .bind(reply)
            .bind(status.unwrap_or(STATUS_RESOLVED))
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Ticket not found".to_string()))
    }
}
