use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account role. Admins pass the back-office gate; clients only see their
/// own scoped resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Client,
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Client => "client",
            AccountRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(AccountRole::Client),
            "admin" => Ok(AccountRole::Admin),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// A stored account (client or admin) with credentials and profile.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn role(&self) -> AccountRole {
        self.role.parse().unwrap_or(AccountRole::Client)
    }

    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(role: &str, status: &str) -> Client {
        Client {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@x.com".into(),
            password_hash: "$argon2id$...".into(),
            phone: String::new(),
            company: String::new(),
            address: String::new(),
            role: role.into(),
            status: status.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_never_serializes() {
        let json = serde_json::to_value(sample("client", "active")).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@x.com");
    }

    #[test]
    fn unknown_role_falls_back_to_client() {
        assert_eq!(sample("superuser", "active").role(), AccountRole::Client);
        assert_eq!(sample("admin", "active").role(), AccountRole::Admin);
    }

    #[test]
    fn status_gates_activity() {
        assert!(sample("client", "active").is_active());
        assert!(!sample("client", "inactive").is_active());
    }
}
