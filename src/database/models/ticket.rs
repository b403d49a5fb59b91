use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_NEW: &str = "New";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_RESOLVED: &str = "Resolved";

pub const STATUSES: [&str; 3] = [STATUS_NEW, STATUS_IN_PROGRESS, STATUS_RESOLVED];

/// A support ticket opened by a client. Owned resource: visibility is
/// scoped to the owning account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub client_id: Uuid,
    pub subject: String,
    pub content: String,
    pub status: String,
    pub admin_reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Admin listing view: ticket joined with the owning client's identity.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TicketWithClient {
    pub id: Uuid,
    pub client_id: Uuid,
    pub subject: String,
    pub content: String,
    pub status: String,
    pub admin_reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub client_name: String,
    pub client_email: String,
    pub client_company: String,
}
