use sea_orm::{Database, DatabaseConnection};
use tracing::info;

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
}

/// Wraps the shared database connection pool.
#[derive(Debug, Clone)]
pub struct Postgres {
    db: DatabaseConnection,
}

impl Postgres {
    pub async fn new(config: PostgresConfig) -> anyhow::Result<Self> {
        let db = Database::connect(&config.database_url).await?;
        info!("connected to database");

        Ok(Self { db })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Applies pending migrations from the bundled `migrations/` directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        let pool = self.db.get_postgres_connection_pool();
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("database migrations applied");

        Ok(())
    }
}
