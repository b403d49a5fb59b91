use anyhow::{anyhow, bail, Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::cli::session::{self, Profile, Session};

/// HTTP client for the portal API. Attaches the cached token to protected
/// calls and clears the session cache on the first 401 so the user is
/// prompted to re-authenticate.
pub struct PortalClient {
    base_url: String,
    http: reqwest::Client,
}

impl PortalClient {
    pub fn from_config() -> Result<Self> {
        let base_url = match std::env::var("SPYWEB_API_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => session::load_server_config()?.base_url,
        };
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /api/clients/auth/login, persisting the session wholesale on
    /// success and storing nothing on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let data = self
            .request(
                Method::POST,
                "/api/clients/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                false,
            )
            .await?;
        self.store_session(data)
    }

    /// POST /api/clients/auth/signup, logging the new account in.
    pub async fn signup(&self, body: Value) -> Result<Session> {
        let data = self
            .request(Method::POST, "/api/clients/auth/signup", Some(body), false)
            .await?;
        self.store_session(data)
    }

    pub async fn get_authed(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None, true).await
    }

    pub async fn post_authed(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body), true).await
    }

    pub async fn put_authed(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(body), true).await
    }

    pub async fn get_public(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None, false).await
    }

    fn store_session(&self, data: Value) -> Result<Session> {
        let token = data
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("server response is missing a session token"))?
            .to_string();
        let profile: Profile =
            serde_json::from_value(data).context("server returned an unreadable profile")?;
        let session = Session { token, profile };
        session::save_session(&session)?;
        Ok(session)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        auth: bool,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if auth {
            let session = session::load_session()?
                .ok_or_else(|| anyhow!("Not logged in. Run `spyweb auth login` first."))?;
            request = request.bearer_auth(session.token);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .context("Server error. Please try again later.")?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .context("Server returned an unreadable response")?;

        if status == StatusCode::UNAUTHORIZED && auth {
            // Terminal for the session: drop the cache and re-authenticate
            session::clear_session()?;
            bail!("Session expired or rejected. Please log in again.");
        }

        if !status.is_success() {
            bail!("{}", format_error(status, &payload));
        }

        Ok(payload.get("data").cloned().unwrap_or(payload))
    }
}

fn format_error(status: StatusCode, payload: &Value) -> String {
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Request failed");

    let mut out = format!("{} ({})", message, status.as_u16());
    if let Some(fields) = payload.get("field_errors").and_then(Value::as_object) {
        for (field, error) in fields {
            out.push_str(&format!("\n  {}: {}", field, error.as_str().unwrap_or("invalid")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_formatting_includes_field_errors() {
        let payload = serde_json::json!({
            "success": false,
            "message": "Invalid input",
            "field_errors": { "email": "Invalid email format" }
        });
        let out = format_error(StatusCode::BAD_REQUEST, &payload);
        assert!(out.contains("Invalid input (400)"));
        assert!(out.contains("email: Invalid email format"));
    }

    #[test]
    fn error_formatting_survives_bare_payloads() {
        let out = format_error(StatusCode::INTERNAL_SERVER_ERROR, &serde_json::json!({}));
        assert!(out.contains("Request failed (500)"));
    }
}
