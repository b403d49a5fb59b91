use clap::Subcommand;
use serde_json::Value;

use crate::cli::api::PortalClient;
use crate::cli::utils::output_list;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List projects assigned to your account")]
    List,

    #[command(about = "List the public portfolio")]
    Portfolio,

    #[command(about = "Show one project")]
    Show {
        #[arg(help = "Project id")]
        id: String,
    },
}

pub async fn handle(cmd: ProjectCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = PortalClient::from_config()?;

    match cmd {
        ProjectCommands::List => {
            let data = client.get_authed("/api/projects/my").await?;
            print_project_list(&output_format, data)
        }
        ProjectCommands::Portfolio => {
            let data = client.get_public("/api/projects").await?;
            print_project_list(&output_format, data)
        }
        ProjectCommands::Show { id } => {
            let data = client.get_authed(&format!("/api/projects/{}", id)).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
    }
}

fn print_project_list(output_format: &OutputFormat, data: Value) -> anyhow::Result<()> {
    let projects = data.as_array().cloned().unwrap_or_default();
    output_list(output_format, &projects, "No projects.", |p| {
        format!(
            "{}  [{} {}%]  {}",
            p["id"].as_str().unwrap_or("?"),
            p["status"].as_str().unwrap_or("?"),
            p["progress"].as_i64().unwrap_or(0),
            p["title"].as_str().unwrap_or("?"),
        )
    })
}
