use clap::Subcommand;
use serde_json::json;

use crate::cli::session::{self, ServerConfig};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Select the API server the CLI talks to")]
    Set {
        #[arg(help = "Server base URL, e.g. http://localhost:5000")]
        url: String,
    },

    #[command(about = "Show the selected server")]
    Show,

    #[command(about = "Check the selected server's health endpoint")]
    Ping,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Set { url } => {
            let base_url = url.trim_end_matches('/').to_string();
            session::save_server_config(&ServerConfig {
                base_url: base_url.clone(),
            })?;
            output_success(
                &output_format,
                &format!("Server set to {}", base_url),
                Some(json!({ "base_url": base_url })),
            )
        }
        ServerCommands::Show => {
            let config = session::load_server_config()?;
            output_success(
                &output_format,
                &config.base_url,
                Some(json!({ "base_url": config.base_url })),
            )
        }
        ServerCommands::Ping => {
            let config = session::load_server_config()?;
            let url = format!("{}/health", config.base_url);
            let client = reqwest::Client::new();
            match client
                .get(&url)
                .timeout(std::time::Duration::from_secs(5))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    output_success(&output_format, "Server is up", None)
                }
                Ok(response) => {
                    anyhow::bail!("Server is degraded ({})", response.status())
                }
                Err(_) => anyhow::bail!("Server is unreachable at {}", config.base_url),
            }
        }
    }
}
