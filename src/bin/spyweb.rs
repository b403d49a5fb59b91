use clap::Parser;

use spyweb_api::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    cli::run(cli).await
}
