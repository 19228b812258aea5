use std::path::PathBuf;

use anyhow::Context;

use allerscan_core::application::create_service;
use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::domain::ingestion::ports::IngestionService;

use crate::commands::print_stats;

#[derive(Debug, clap::Args)]
pub struct ImportArgs {
    /// JSON file holding an array of pre-classified product records
    #[arg(long)]
    pub file: PathBuf,

    /// Report what would happen without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(config: AllerscanConfig, args: ImportArgs) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&raw).context("import file must hold a JSON array")?;

    let service = create_service(config).await?;
    let stats = service.import_manual_batch(records, args.dry_run).await;

    print_stats(&stats);
    Ok(())
}
