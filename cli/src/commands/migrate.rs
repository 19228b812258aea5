use allerscan_core::domain::common::AllerscanConfig;
use allerscan_core::infrastructure::db::postgres::{Postgres, PostgresConfig};

pub async fn run(config: AllerscanConfig) -> anyhow::Result<()> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;
    postgres.migrate().await?;
    println!("migrations applied");

    Ok(())
}
