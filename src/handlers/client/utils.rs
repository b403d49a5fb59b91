use serde_json::{json, Value};

use crate::auth::{generate_token, Claims};
use crate::database::models::client::Client;
use crate::error::ApiError;

/// Build the login/signup response body: the account profile (hash never
/// serializes) plus a freshly issued token and its lifetime.
pub fn session_payload(client: &Client) -> Result<Value, ApiError> {
    let claims = Claims::new(client.id, client.email.clone(), client.role());
    let token = generate_token(&claims)?;

    let mut payload = serde_json::to_value(client).map_err(|e| {
        tracing::error!("Failed to serialize account profile: {}", e);
        ApiError::internal_server_error("Failed to build session response")
    })?;
    payload["token"] = json!(token);
    payload["expires_in"] = json!(claims.expires_in());

    Ok(payload)
}
