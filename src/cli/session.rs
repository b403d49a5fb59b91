use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Profile snapshot kept alongside the token. Tolerant of extra fields so
/// both the login payload and the /me payload deserialize into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub role: String,
}

/// The session cache: single holder of the issued token, written wholesale
/// at login, deleted wholesale at logout or on the first rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("SPYWEB_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("spyweb").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<Option<Session>> {
    let session_file = get_config_dir()?.join("session.json");

    if !session_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(session_file)?;
    let session: Session = serde_json::from_str(&content)?;
    Ok(Some(session))
}

pub fn save_session(session: &Session) -> anyhow::Result<()> {
    let session_file = get_config_dir()?.join("session.json");

    let content = serde_json::to_string_pretty(session)?;
    fs::write(session_file, content)?;
    Ok(())
}

/// Unconditional delete; missing file is already the logged-out state.
pub fn clear_session() -> anyhow::Result<()> {
    let session_file = get_config_dir()?.join("session.json");

    if session_file.exists() {
        fs::remove_file(session_file)?;
    }
    Ok(())
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let server_file = get_config_dir()?.join("server.json");

    if !server_file.exists() {
        return Ok(ServerConfig::default());
    }

    let content = fs::read_to_string(server_file)?;
    let config: ServerConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_server_config(config: &ServerConfig) -> anyhow::Result<()> {
    let server_file = get_config_dir()?.join("server.json");

    let content = serde_json::to_string_pretty(config)?;
    fs::write(server_file, content)?;
    Ok(())
}
