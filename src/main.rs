use axum::{middleware::from_fn, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use spyweb_api::database::manager::DatabaseManager;
use spyweb_api::database::schema;
use spyweb_api::middleware as mw;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = spyweb_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting SPYWEB API in {:?} mode", config.environment);

    // Best-effort schema bootstrap. The server still starts when the store
    // is down; /health reports degraded and requests fail with 503.
    match DatabaseManager::pool().await {
        Ok(pool) => {
            if let Err(e) = schema::ensure_schema(&pool).await {
                tracing::warn!("Schema bootstrap failed: {}", e);
            }
        }
        Err(e) => tracing::warn!("Database unavailable at startup: {}", e),
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("SPYWEB_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("SPYWEB API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public marketing content + token acquisition
        .merge(public_routes())
        .merge(client_auth_routes())
        // Client portal (bearer token)
        .merge(portal_routes())
        // Back-office (bearer token + admin role)
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::post;
    use spyweb_api::handlers::public::{about, contacts, projects, services};

    Router::new()
        .route("/api/services", get(services::list))
        .route("/api/about", get(about::get))
        .route("/api/contacts", post(contacts::submit))
        // Project listings are public but scope their rows when a token is
        // presented, so these two get the optional-auth layer
        .route("/api/projects", get(projects::list))
        .route("/api/projects/:id", get(projects::get))
        .route_layer(from_fn(mw::optional_auth_middleware))
}

fn client_auth_routes() -> Router {
    use axum::routing::post;
    use spyweb_api::handlers::client::{login, signup};

    Router::new()
        .route("/api/clients/auth/signup", post(signup::signup))
        .route("/api/clients/auth/login", post(login::login))
}

fn portal_routes() -> Router {
    use axum::routing::put;
    use spyweb_api::handlers::client::{profile, projects, support};

    Router::new()
        .route("/api/clients/auth/me", get(profile::me))
        .route("/api/clients/auth/profile", put(profile::update_profile))
        .route("/api/projects/my", get(projects::my_projects))
        .route("/api/messages", get(support::list).post(support::open))
        // Innermost runs last: token check, then the account re-read
        .route_layer(from_fn(mw::validate_client_middleware))
        .route_layer(from_fn(mw::jwt_auth_middleware))
}

fn admin_routes() -> Router {
    use axum::routing::{post, put};
    use spyweb_api::handlers::admin::{about, clients, contacts, projects, services, support};

    Router::new()
        .route("/api/services", post(services::create))
        .route("/api/services/:id", put(services::update).delete(services::delete))
        .route("/api/projects", post(projects::create))
        .route("/api/projects/:id", put(projects::update).delete(projects::delete))
        .route("/api/clients", get(clients::list).post(clients::create))
        .route("/api/clients/:id", put(clients::update).delete(clients::delete))
        .route("/api/contacts", get(contacts::list))
        .route("/api/contacts/:id", put(contacts::update).delete(contacts::delete))
        .route("/api/about", put(about::update))
        .route("/api/messages/admin/all", get(support::list_all))
        .route("/api/messages/:id/reply", post(support::reply))
        .route_layer(from_fn(mw::require_admin_middleware))
        .route_layer(from_fn(mw::validate_client_middleware))
        .route_layer(from_fn(mw::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "SPYWEB API",
            "version": version,
            "description": "Marketing site, admin back-office and client portal backend",
            "endpoints": {
                "home": "/ (public)",
                "content": "/api/services, /api/projects[/:id], /api/about (public)",
                "contact": "/api/contacts (public)",
                "client_auth": "/api/clients/auth/signup, /api/clients/auth/login (public - token acquisition)",
                "portal": "/api/clients/auth/me, /api/clients/auth/profile, /api/projects/my, /api/messages (protected)",
                "admin": "/api/clients, /api/contacts, /api/messages/admin/all, content mutations (restricted, admin role)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
