pub mod auth;
pub mod response;

pub use auth::{
    jwt_auth_middleware, optional_auth_middleware, require_admin_middleware,
    validate_client_middleware, AuthUser, MaybeClient, ValidatedClient,
};
pub use response::{ApiResponse, ApiResult};
