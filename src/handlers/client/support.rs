use axum::{Extension, Json};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::ticket::Ticket;
use crate::database::tickets::TicketRepository;
use crate::handlers::validate::{require_non_empty, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult, ValidatedClient};

/// GET /api/messages - Support tickets opened by the authenticated account
pub async fn list(Extension(client): Extension<ValidatedClient>) -> ApiResult<Vec<Ticket>> {
    let pool = DatabaseManager::pool().await?;
    let tickets = TicketRepository::new(pool).list_owned(client.id).await?;
    Ok(ApiResponse::success(tickets))
}

#[derive(Debug, Deserialize)]
pub struct OpenTicketRequest {
    pub subject: String,
    pub content: String,
}

/// POST /api/messages - Open a support ticket
pub async fn open(
    Extension(client): Extension<ValidatedClient>,
    Json(payload): Json<OpenTicketRequest>,
) -> ApiResult<Ticket> {
    let mut fields = FieldErrors::new();
    fields.check("subject", require_non_empty(&payload.subject, "Subject"));
    fields.check("content", require_non_empty(&payload.content, "Message"));
    fields.into_result()?;

    let pool = DatabaseManager::pool().await?;
    let ticket = TicketRepository::new(pool)
        .insert(client.id, payload.subject.trim(), payload.content.trim())
        .await?;

    tracing::info!("Support ticket {} opened by {}", ticket.id, client.email);
    Ok(ApiResponse::created(ticket))
}
