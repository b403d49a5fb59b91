use clap::Subcommand;
use serde_json::json;

use crate::cli::api::PortalClient;
use crate::cli::utils::{output_list, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum SupportCommands {
    #[command(about = "List your support tickets")]
    List,

    #[command(about = "Open a support ticket")]
    Open {
        #[arg(help = "Subject line")]
        subject: String,
        #[arg(help = "Message body")]
        message: String,
    },
}

pub async fn handle(cmd: SupportCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = PortalClient::from_config()?;

    match cmd {
        SupportCommands::List => {
            let data = client.get_authed("/api/messages").await?;
            let tickets = data.as_array().cloned().unwrap_or_default();
            output_list(&output_format, &tickets, "No tickets.", |t| {
                let mut line = format!(
                    "{}  [{}]  {}",
                    t["id"].as_str().unwrap_or("?"),
                    t["status"].as_str().unwrap_or("?"),
                    t["subject"].as_str().unwrap_or("?"),
                );
                if let Some(reply) = t["admin_reply"].as_str() {
                    line.push_str(&format!("\n    reply: {}", reply));
                }
                line
            })
        }
        SupportCommands::Open { subject, message } => {
            let ticket = client
                .post_authed(
                    "/api/messages",
                    json!({ "subject": subject, "content": message }),
                )
                .await?;
            output_success(
                &output_format,
                &format!("Ticket opened: {}", ticket["id"].as_str().unwrap_or("?")),
                Some(ticket),
            )
        }
    }
}
