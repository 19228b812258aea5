use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = commands::Cli::parse();
    commands::run(cli).await
}
