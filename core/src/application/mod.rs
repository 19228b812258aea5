use crate::domain::{common::AllerscanConfig, common::services::Service, ingestion::registry::SourceRegistry};
use crate::infrastructure::{
    catalog::repositories::catalog_repository::PostgresCatalogRepository,
    classifier::openai_client::OpenAiClassifierClient,
    db::postgres::{Postgres, PostgresConfig},
    safety::repositories::user_allergy_repository::PostgresUserAllergyRepository,
    sources::{edeka::EdekaAdapter, openfoodfacts::OpenFoodFactsAdapter, rewe::ReweAdapter},
};

pub type DefaultService = Service<
    PostgresCatalogRepository,
    PostgresUserAllergyRepository,
    OpenAiClassifierClient,
    OpenFoodFactsAdapter,
    ReweAdapter,
    EdekaAdapter,
>;

/// Wires the production service: Postgres persistence, the OpenAI-compatible
/// classifier, and the external source adapters. Runs pending migrations
/// before handing the service out.
pub async fn create_service(config: AllerscanConfig) -> anyhow::Result<DefaultService> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;
    postgres.migrate().await?;
    let db = postgres.get_db();

    Ok(Service::new(
        PostgresCatalogRepository::new(db.clone()),
        PostgresUserAllergyRepository::new(db),
        OpenAiClassifierClient::new(config.classifier.api_key, config.classifier.model),
        SourceRegistry::new(
            OpenFoodFactsAdapter::new(),
            ReweAdapter::new(),
            EdekaAdapter::new(),
        ),
    ))
}
