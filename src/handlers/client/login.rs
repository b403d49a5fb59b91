use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::password;
use crate::database::clients::ClientRepository;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

use super::utils::session_payload;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// One message for every failure mode so responses cannot be used to probe
// which emails have accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// POST /api/clients/auth/login - Verify credentials and issue a session
/// token
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let repository = ClientRepository::new(pool);

    // Emails are stored lowercased at signup; match that here
    let email = payload.email.trim().to_lowercase();
    let client = match repository.find_by_email(&email).await? {
        Some(client) => client,
        None => {
            // Burn an equivalent verification so both paths cost the same
            password::verify_dummy(&payload.password);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    if !password::verify_password(&client.password_hash, &payload.password) {
        tracing::warn!("Failed login for {}", client.email);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    if !client.is_active() {
        tracing::warn!("Login attempt for deactivated account {}", client.email);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    tracing::info!("Client login: {}", client.email);
    Ok(ApiResponse::success(session_payload(&client)?))
}
