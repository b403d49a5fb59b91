use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::Claims;
use crate::config;
use crate::database::clients::ClientRepository;
use crate::database::manager::DatabaseManager;
use crate::database::models::client::AccountRole;
use crate::database::Scope;
use crate::error::ApiError;

/// Authenticated account context extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: AccountRole,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Account context re-validated against the store on every request, so a
/// token outlives neither its account nor its active status.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ValidatedClient {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub role: AccountRole,
}

impl ValidatedClient {
    pub fn scope(&self) -> Scope {
        match self.role {
            AccountRole::Admin => Scope::All,
            AccountRole::Client => Scope::Client(self.id),
        }
    }
}

/// Optional identity for routes that serve both anonymous and
/// authenticated viewers (public project listings).
#[derive(Clone, Debug)]
pub struct MaybeClient(pub Option<ValidatedClient>);

impl MaybeClient {
    pub fn scope(&self) -> Scope {
        self.0.as_ref().map(|c| c.scope()).unwrap_or(Scope::Public)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeClient
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeClient(parts.extensions.get::<ValidatedClient>().cloned()))
    }
}

/// Token-validating middleware: extracts the bearer token, verifies
/// signature and expiry, and injects the decoded identity.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = validate_token(&token).map_err(|msg| {
        tracing::warn!("Rejected session token: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Middleware that re-reads the account row behind the token, catching
/// accounts deleted or deactivated since the token was issued.
pub async fn validate_client_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?
        .clone();

    let validated = lookup_client(&auth_user).await?;
    request.extensions_mut().insert(validated);

    Ok(next.run(request).await)
}

/// Middleware for back-office routes: the validated account must be an
/// admin.
pub async fn require_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let client = request
        .extensions()
        .get::<ValidatedClient>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if client.role != AccountRole::Admin {
        tracing::warn!("Account {} denied admin access", client.email);
        return Err(ApiError::forbidden("Administrator access required"));
    }

    Ok(next.run(request).await)
}

/// Middleware for routes that are public but scope their results when a
/// token is presented. No header means anonymous; a bad token is still
/// rejected rather than silently downgraded.
pub async fn optional_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if headers.get("authorization").is_none() && headers.get("Authorization").is_none() {
        return Ok(next.run(request).await);
    }

    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let claims = validate_token(&token).map_err(ApiError::unauthorized)?;
    let validated = lookup_client(&AuthUser::from(claims)).await?;
    request.extensions_mut().insert(validated);

    Ok(next.run(request).await)
}

async fn lookup_client(auth_user: &AuthUser) -> Result<ValidatedClient, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let repository = ClientRepository::new(pool);

    let client = repository
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for missing account {}", auth_user.id);
            ApiError::unauthorized("Session is no longer valid")
        })?;

    if !client.is_active() {
        tracing::warn!("Token for deactivated account {}", client.email);
        return Err(ApiError::unauthorized("Session is no longer valid"));
    }

    Ok(ValidatedClient {
        id: client.id,
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        company: client.company.clone(),
        address: client.address.clone(),
        role: client.role(),
    })
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate a session token and extract its claims
fn validate_token(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("Signing key not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid session token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_token, Claims};
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_extraction_requires_scheme_and_token() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
        assert!(extract_bearer_token(&headers_with("Basic abc")).is_err());
        assert!(extract_bearer_token(&headers_with("Bearer ")).is_err());
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap(),
            "abc.def.ghi"
        );
    }

    #[test]
    fn valid_token_round_trips_claims() {
        let id = Uuid::new_v4();
        let claims = Claims::new(id, "a@x.com".into(), AccountRole::Client);
        let token = generate_token(&claims).unwrap();

        let decoded = validate_token(&token).unwrap();
        assert_eq!(decoded.sub, id);
        assert_eq!(decoded.email, "a@x.com");
        assert_eq!(decoded.role, AccountRole::Client);
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@x.com".into(),
            role: AccountRole::Client,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = generate_token(&claims).unwrap();
        assert!(validate_token(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "a@x.com".into(), AccountRole::Client);
        let token = generate_token(&claims).unwrap();
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);
        assert!(validate_token(&tampered).is_err());
        assert!(validate_token("not-a-token").is_err());
    }

    #[test]
    fn scope_follows_role() {
        let client = ValidatedClient {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "a@x.com".into(),
            phone: String::new(),
            company: String::new(),
            address: String::new(),
            role: AccountRole::Client,
        };
        assert_eq!(client.scope(), Scope::Client(client.id));

        let admin = ValidatedClient {
            role: AccountRole::Admin,
            ..client.clone()
        };
        assert_eq!(admin.scope(), Scope::All);

        assert_eq!(MaybeClient(None).scope(), Scope::Public);
    }
}
