use allerscan_core::application::create_service;
use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::domain::ingestion::ports::IngestionService;
use allerscan_core::domain::ingestion::value_objects::SourceId;

use crate::commands::print_stats;

#[derive(Debug, clap::Args)]
pub struct ScrapeArgs {
    /// Source to scrape: openfoodfacts, rewe or edeka
    #[arg(long, default_value = "openfoodfacts")]
    pub source: SourceId,

    /// Maximum number of products to fetch
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    /// Restrict to one product category (see `categories`)
    #[arg(long)]
    pub category: Option<String>,

    /// Report what would happen without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(config: AllerscanConfig, args: ScrapeArgs) -> anyhow::Result<()> {
    let service = create_service(config).await?;

    let stats = service
        .scrape_and_import(args.source, args.limit, args.category, args.dry_run)
        .await?;

    print_stats(&stats);
    Ok(())
}
