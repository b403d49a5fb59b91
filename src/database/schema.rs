use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password;
use crate::config::{self, Environment};
use crate::database::manager::DatabaseError;
use crate::database::models::client::AccountRole;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        phone TEXT NOT NULL DEFAULT '',
        company TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        role TEXT NOT NULL DEFAULT 'client',
        status TEXT NOT NULL DEFAULT 'active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        image_url TEXT NOT NULL DEFAULT '',
        technologies TEXT[] NOT NULL DEFAULT '{}',
        status TEXT NOT NULL DEFAULT 'Planning',
        progress INT NOT NULL DEFAULT 0,
        start_date TIMESTAMPTZ,
        end_date TIMESTAMPTZ,
        client_id UUID REFERENCES clients(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id UUID PRIMARY KEY,
        icon TEXT NOT NULL DEFAULT 'Shield',
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        message TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'new',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS about_content (
        id UUID PRIMARY KEY,
        description TEXT NOT NULL DEFAULT '',
        mission TEXT NOT NULL DEFAULT '',
        vision TEXT NOT NULL DEFAULT '',
        core_values TEXT NOT NULL DEFAULT '',
        leadership JSONB NOT NULL DEFAULT '[]',
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tickets (
        id UUID PRIMARY KEY,
        client_id UUID NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
        subject TEXT NOT NULL,
        content TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'New',
        admin_reply TEXT,
        replied_at TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS projects_client_id_idx ON projects (client_id)",
    "CREATE INDEX IF NOT EXISTS tickets_client_id_idx ON tickets (client_id)",
];

/// Create missing tables and seed the initial admin account. Runs at
/// startup; idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in DDL {
        sqlx::query(statement).execute(pool).await?;
    }
    seed_admin(pool).await?;
    Ok(())
}

/// Seed one admin account when none exists. Credentials come from
/// SPYWEB_ADMIN_EMAIL / SPYWEB_ADMIN_PASSWORD; development falls back to a
/// local default so a fresh checkout has a working back-office login.
async fn seed_admin(pool: &PgPool) -> Result<(), DatabaseError> {
    let admins: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE role = $1")
            .bind(AccountRole::Admin.as_str())
            .fetch_one(pool)
            .await?;
    if admins > 0 {
        return Ok(());
    }

    let env_email = std::env::var("SPYWEB_ADMIN_EMAIL").ok();
    let env_password = std::env::var("SPYWEB_ADMIN_PASSWORD").ok();

    let (email, password_source) = match (env_email, env_password) {
        (Some(email), Some(password)) => (email, password),
        _ if matches!(config::config().environment, Environment::Development) => {
            ("admin@spyweb.local".to_string(), "spyweb-admin".to_string())
        }
        _ => {
            info!("No admin account present and SPYWEB_ADMIN_EMAIL/PASSWORD unset; skipping seed");
            return Ok(());
        }
    };

    let hash = password::hash_password(&password_source)
        .map_err(|e| DatabaseError::QueryError(format!("admin seed hash failed: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO clients (id, name, email, password_hash, role, status)
        VALUES ($1, $2, $3, $4, $5, 'active')
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("Administrator")
    .bind(&email)
    .bind(&hash)
    .bind(AccountRole::Admin.as_str())
    .execute(pool)
    .await?;

    info!("Seeded admin account: {}", email);
    Ok(())
}
