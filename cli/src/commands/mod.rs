use clap::{Parser, Subcommand};

use allerscan_core::domain::common::{AllerscanConfig, ClassifierConfig, DatabaseConfig};
use allerscan_core::domain::ingestion::value_objects::ImportStats;

pub mod add_product;
pub mod allergy;
pub mod categories;
pub mod check;
pub mod import;
pub mod lookup;
pub mod migrate;
pub mod scheduled;
pub mod scrape;

#[derive(Debug, Parser)]
#[command(name = "allerscan", about = "Food product and allergen catalog tooling")]
pub struct Cli {
    #[command(flatten)]
    pub env: EnvArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Args)]
pub struct EnvArgs {
    #[arg(long, env = "DATABASE_HOST", default_value = "localhost")]
    pub database_host: String,

    #[arg(long, env = "DATABASE_PORT", default_value_t = 5432)]
    pub database_port: u16,

    #[arg(long, env = "DATABASE_USER", default_value = "postgres")]
    pub database_user: String,

    #[arg(long, env = "DATABASE_PASSWORD", default_value = "", hide_env_values = true)]
    pub database_password: String,

    #[arg(long, env = "DATABASE_NAME", default_value = "allerscan")]
    pub database_name: String,

    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub openai_api_key: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4.1-mini")]
    pub openai_model: String,
}

impl EnvArgs {
    pub fn config(&self) -> AllerscanConfig {
        AllerscanConfig {
            database: DatabaseConfig {
                host: self.database_host.clone(),
                port: self.database_port,
                username: self.database_user.clone(),
                password: self.database_password.clone(),
                name: self.database_name.clone(),
            },
            classifier: ClassifierConfig {
                api_key: self.openai_api_key.clone(),
                model: self.openai_model.clone(),
            },
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending database migrations
    Migrate,
    /// List the product categories available for scraping
    Categories,
    /// Look up a product by UPC, importing it on demand
    Lookup(lookup::LookupArgs),
    /// Check a product against allergy terms
    Check(check::CheckArgs),
    /// Fetch products from an external source and import them
    Scrape(scrape::ScrapeArgs),
    /// Run the scheduled scraping batch, guarded against overlap
    Scheduled(scheduled::ScheduledArgs),
    /// Import pre-classified products from a JSON file
    Import(import::ImportArgs),
    /// Create a product from an ingredient label photograph
    AddProduct(add_product::AddProductArgs),
    /// Manage a user's recorded allergies
    Allergy(allergy::AllergyArgs),
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.env.config();

    match cli.command {
        Command::Migrate => migrate::run(config).await,
        Command::Categories => {
            categories::run();
            Ok(())
        }
        Command::Lookup(args) => lookup::run(config, args).await,
        Command::Check(args) => check::run(config, args).await,
        Command::Scrape(args) => scrape::run(config, args).await,
        Command::Scheduled(args) => scheduled::run(config, args).await,
        Command::Import(args) => import::run(config, args).await,
        Command::AddProduct(args) => add_product::run(config, args).await,
        Command::Allergy(args) => allergy::run(config, args).await,
    }
}

pub(crate) fn print_stats(stats: &ImportStats) {
    println!(
        "processed: {}, created: {}, updated: {}, skipped: {}, errors: {}, degraded: {}",
        stats.processed, stats.created, stats.updated, stats.skipped, stats.errors, stats.degraded
    );
}
