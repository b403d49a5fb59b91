use axum::{extract::Path, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::ticket::{Ticket, TicketWithClient, STATUSES};
use crate::database::tickets::TicketRepository;
use crate::error::ApiError;
use crate::handlers::validate::{require_non_empty, FieldErrors};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/messages/admin/all - Every ticket with its client's identity
pub async fn list_all() -> ApiResult<Vec<TicketWithClient>> {
    let pool = DatabaseManager::pool().await?;
    let tickets = TicketRepository::new(pool).list_all_with_clients().await?;
    Ok(ApiResponse::success(tickets))
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
    pub status: Option<String>,
}

/// POST /api/messages/:id/reply - Answer a ticket; status defaults to
/// Resolved
pub async fn reply(
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplyRequest>,
) -> ApiResult<Ticket> {
    let mut fields = FieldErrors::new();
    fields.check("reply", require_non_empty(&payload.reply, "Reply"));
    fields.into_result()?;

    if let Some(status) = payload.status.as_deref() {
        if !STATUSES.contains(&status) {
            return Err(ApiError::bad_request(format!(
                "Status must be one of: {}",
                STATUSES.join(", ")
            )));
        }
    }

    let pool = DatabaseManager::pool().await?;
    let ticket = TicketRepository::new(pool)
        .reply(id, payload.reply.trim(), payload.status.as_deref())
        .await?;

    Ok(ApiResponse::success(ticket))
}
