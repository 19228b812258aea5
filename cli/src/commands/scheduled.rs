use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbBackend, Statement};
use sea_orm::ConnectionTrait;

use allerscan_core::application::create_service;
use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::domain::ingestion::ports::IngestionService;

use crate::commands::print_stats;

/// Advisory lock key for the scheduled scrape. One key, one runner, across
/// every host sharing the database.
const SCRAPE_LOCK_KEY: i64 = 874_215_301;

#[derive(Debug, clap::Args)]
pub struct ScheduledArgs {
    /// Wait for a running batch to finish instead of skipping
    #[arg(long)]
    pub force: bool,

    /// Report what would happen without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

async fn acquire_lock(db: &DatabaseConnection, blocking: bool) -> anyhow::Result<bool> {
    if blocking {
        db.execute(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT pg_advisory_lock($1)",
            [SCRAPE_LOCK_KEY.into()],
        ))
        .await?;
        return Ok(true);
    }

    let row = db
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT pg_try_advisory_lock($1) AS acquired",
            [SCRAPE_LOCK_KEY.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(row.try_get("", "acquired")?),
        None => Ok(false),
    }
}

pub async fn run(config: AllerscanConfig, args: ScheduledArgs) -> anyhow::Result<()> {
    // Dedicated single-connection session: the advisory lock lives exactly as
    // long as this process.
    let mut options = ConnectOptions::new(config.database.url());
    options.max_connections(1);
    let lock_db = Database::connect(options).await?;

    if !acquire_lock(&lock_db, args.force).await? {
        println!("another scheduled batch is running, skipping");
        return Ok(());
    }

    let service = create_service(config).await?;

    let total = service.run_scheduled_batch(args.dry_run).await?;
    print_stats(&total);
    Ok(())
}
