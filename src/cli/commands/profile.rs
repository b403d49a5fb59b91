use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::api::PortalClient;
use crate::cli::session::{self, Profile, Session};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show the account profile")]
    Show,

    #[command(about = "Update profile fields; changing the password reissues the session token")]
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

pub async fn handle(cmd: ProfileCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ProfileCommands::Show => {
            let client = PortalClient::from_config()?;
            let profile = client.get_authed("/api/clients/auth/me").await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        ProfileCommands::Update {
            name,
            email,
            phone,
            company,
            address,
            password,
        } => {
            let mut body = serde_json::Map::new();
            let mut set = |key: &str, value: Option<String>| {
                if let Some(value) = value {
                    body.insert(key.to_string(), json!(value));
                }
            };
            set("name", name);
            set("email", email);
            set("phone", phone);
            set("company", company);
            set("address", address);
            set("password", password);

            if body.is_empty() {
                anyhow::bail!("Nothing to update. Pass at least one --field.");
            }

            let client = PortalClient::from_config()?;
            let data = client
                .put_authed("/api/clients/auth/profile", Value::Object(body))
                .await?;

            // A reissued token means the password changed: replace the
            // cached session wholesale
            if let Some(token) = data.get("token").and_then(Value::as_str) {
                let profile: Profile = serde_json::from_value(data.clone())?;
                session::save_session(&Session {
                    token: token.to_string(),
                    profile,
                })?;
            } else if let Some(mut cached) = session::load_session()? {
                cached.profile = serde_json::from_value(data.clone())?;
                session::save_session(&cached)?;
            }

            output_success(&output_format, "Profile updated", Some(data))
        }
    }
}
