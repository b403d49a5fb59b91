use clap::Subcommand;

use crate::cli::api::PortalClient;
use crate::cli::utils::output_list;
use crate::cli::OutputFormat;
use crate::database::models::service::ServiceIcon;

#[derive(Subcommand)]
pub enum ServiceCommands {
    #[command(about = "List the public service catalogue")]
    List,
}

pub async fn handle(cmd: ServiceCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServiceCommands::List => {
            let client = PortalClient::from_config()?;
            let data = client.get_public("/api/services").await?;
            let services = data.as_array().cloned().unwrap_or_default();

            output_list(&output_format, &services, "No services.", |s| {
                let icon = ServiceIcon::from_tag(s["icon"].as_str().unwrap_or(""));
                format!(
                    "{}  {} - {}",
                    icon.glyph(),
                    s["title"].as_str().unwrap_or("?"),
                    s["description"].as_str().unwrap_or(""),
                )
            })
        }
    }
}
