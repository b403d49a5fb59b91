use clap::Subcommand;
use serde_json::json;

use crate::cli::api::PortalClient;
use crate::cli::session;
use crate::cli::utils::{output_success, password_or_prompt};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Log in to the client portal")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Log out and discard the cached session")]
    Logout,

    #[command(about = "Show the cached session without contacting the server")]
    Status,

    #[command(about = "Fetch the server-verified account profile")]
    Whoami,

    #[command(about = "Create a client account")]
    Register {
        #[arg(help = "Full name")]
        name: String,
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Company name")]
        company: Option<String>,
        #[arg(long, help = "Phone number")]
        phone: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = password_or_prompt(password, "Password")?;
            let client = PortalClient::from_config()?;
            let session = client.login(&email, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as {}", session.profile.email),
                Some(json!({ "name": session.profile.name, "email": session.profile.email })),
            )
        }
        AuthCommands::Logout => {
            session::clear_session()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => match session::load_session()? {
            Some(session) => output_success(
                &output_format,
                &format!("Logged in as {}", session.profile.email),
                Some(serde_json::to_value(&session.profile)?),
            ),
            None => output_success(&output_format, "Not logged in", None),
        },
        AuthCommands::Whoami => {
            let client = PortalClient::from_config()?;
            let profile = client.get_authed("/api/clients/auth/me").await?;
            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                }
                OutputFormat::Text => {
                    println!(
                        "{} <{}>",
                        profile["name"].as_str().unwrap_or("?"),
                        profile["email"].as_str().unwrap_or("?")
                    );
                    if let Some(company) = profile["company"].as_str() {
                        if !company.is_empty() {
                            println!("  company: {}", company);
                        }
                    }
                    if let Some(role) = profile["role"].as_str() {
                        println!("  role: {}", role);
                    }
                }
            }
            Ok(())
        }
        AuthCommands::Register {
            name,
            email,
            password,
            company,
            phone,
        } => {
            let password = password_or_prompt(password, "Password")?;
            let client = PortalClient::from_config()?;
            let session = client
                .signup(json!({
                    "name": name,
                    "email": email,
                    "password": password,
                    "company": company.unwrap_or_default(),
                    "phone": phone.unwrap_or_default(),
                }))
                .await?;
            output_success(
                &output_format,
                &format!("Account created for {}", session.profile.email),
                Some(json!({ "name": session.profile.name, "email": session.profile.email })),
            )
        }
    }
}
