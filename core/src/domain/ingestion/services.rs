use tracing::{debug, error, info, warn};

use crate::domain::{
    catalog::{
        entities::Product,
        ports::CatalogRepository,
        value_objects::{NewIngredient, ProductDetail},
    },
    classification::{entities::ImageMime, helpers::report_to_ingredients, ports::ClassifierClient},
    common::{entities::app_errors::CoreError, services::Service},
    ingestion::{
        ports::{IngestionService, SourceAdapter},
        value_objects::{
            CandidateImport, ImportOutcome, ImportStats, ManualProduct, ProductCandidate,
            SourceId, scrape_plan,
        },
    },
    safety::ports::UserAllergyRepository,
    text::{normalize_text, normalize_upc},
};

impl<C, U, L, P, R, E> Service<C, U, L, P, R, E>
where
    C: CatalogRepository,
    U: UserAllergyRepository,
    L: ClassifierClient,
    P: SourceAdapter,
    R: SourceAdapter,
    E: SourceAdapter,
{
    /// Classifies raw ingredient text, degrading to a single raw-text
    /// ingredient with no allergens when the classifier fails or returns an
    /// empty report. The boolean reports whether the fallback was taken.
    pub(crate) async fn classified_ingredients(
        &self,
        raw_text: &str,
    ) -> (Vec<NewIngredient>, bool) {
        match self.analyze_ingredient_text(raw_text).await {
            Ok(report) => {
                let rows = report_to_ingredients(&report);
                if rows.is_empty() {
                    warn!("classifier returned an empty report, storing raw text");
                    (vec![raw_ingredient(raw_text)], true)
                } else {
                    (rows, false)
                }
            }
            Err(error) => {
                warn!(%error, "ingredient classification failed, storing raw text");
                (vec![raw_ingredient(raw_text)], true)
            }
        }
    }

    async fn import_manual_record(
        &self,
        record: ManualProduct,
        dry_run: bool,
    ) -> Result<ImportOutcome, CoreError> {
        let upc_code = normalize_upc(&record.upc)?;
        let name = normalize_text(&record.name);
        if name.is_empty() {
            return Err(CoreError::InvalidCandidate(
                "missing product name".to_string(),
            ));
        }

        if self
            .catalog_repository
            .find_product_by_upc(upc_code.clone())
            .await?
            .is_some()
        {
            warn!(upc_code, "product already exists, skipping");
            return Ok(ImportOutcome::Skipped);
        }

        if dry_run {
            return Ok(ImportOutcome::Created);
        }

        let rows: Vec<NewIngredient> = record
            .ingredients
            .into_iter()
            .filter_map(|ingredient| {
                let title = normalize_text(ingredient.name.as_deref()?);
                if title.is_empty() {
                    return None;
                }
                Some(NewIngredient {
                    title,
                    allergens: ingredient
                        .allergens
                        .into_iter()
                        .map(|name| name.trim().to_string())
                        .filter(|name| !name.is_empty())
                        .collect(),
                })
            })
            .collect();

        let product = Product::new(name, upc_code, None);
        match self
            .catalog_repository
            .create_product_with_ingredients(product, rows)
            .await
        {
            Ok(_) => Ok(ImportOutcome::Created),
            Err(CoreError::DuplicateProduct) => Ok(ImportOutcome::Skipped),
            Err(error) => Err(error),
        }
    }
}

impl<C, U, L, P, R, E> IngestionService for Service<C, U, L, P, R, E>
where
    C: CatalogRepository,
    U: UserAllergyRepository,
    L: ClassifierClient,
    P: SourceAdapter,
    R: SourceAdapter,
    E: SourceAdapter,
{
    async fn import_candidate(
        &self,
        candidate: ProductCandidate,
        dry_run: bool,
    ) -> Result<CandidateImport, CoreError> {
        let upc_code = normalize_upc(&candidate.upc_code)?;
        let name = normalize_text(&candidate.name);
        if name.is_empty() {
            return Err(CoreError::InvalidCandidate(
                "missing product name".to_string(),
            ));
        }

        let ingredients_text = candidate
            .ingredients_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        if let Some(existing) = self
            .catalog_repository
            .find_product_by_upc(upc_code.clone())
            .await?
        {
            if self
                .catalog_repository
                .count_ingredients(existing.id)
                .await?
                > 0
            {
                debug!(upc_code, "product already has ingredients, skipping");
                return Ok(CandidateImport::clean(ImportOutcome::Skipped));
            }

            let Some(text) = ingredients_text else {
                return Ok(CandidateImport::clean(ImportOutcome::Skipped));
            };

            if dry_run {
                return Ok(CandidateImport::clean(ImportOutcome::Updated));
            }

            let (rows, degraded) = self.classified_ingredients(text).await;
            self.catalog_repository
                .add_ingredients(existing.id, rows)
                .await?;
            return Ok(CandidateImport {
                outcome: ImportOutcome::Updated,
                degraded,
            });
        }

        if dry_run {
            return Ok(CandidateImport::clean(ImportOutcome::Created));
        }

        let (rows, degraded) = match ingredients_text {
            Some(text) => self.classified_ingredients(text).await,
            None => (Vec::new(), false),
        };

        let product = Product::new(name, upc_code.clone(), candidate.image_ingredients_url);
        match self
            .catalog_repository
            .create_product_with_ingredients(product, rows)
            .await
        {
            Ok(_) => Ok(CandidateImport {
                outcome: ImportOutcome::Created,
                degraded,
            }),
            Err(CoreError::DuplicateProduct) => {
                // Lost a race against a concurrent import of the same UPC.
                debug!(upc_code, "duplicate UPC on insert, skipping");
                Ok(CandidateImport::clean(ImportOutcome::Skipped))
            }
            Err(error) => Err(error),
        }
    }

    async fn import_batch(&self, candidates: Vec<ProductCandidate>, dry_run: bool) -> ImportStats {
        let mut stats = ImportStats::default();

        for candidate in candidates {
            let upc_code = candidate.upc_code.clone();
            match self.import_candidate(candidate, dry_run).await {
                Ok(import) => stats.record(import),
                Err(CoreError::InvalidCandidate(reason)) => {
                    warn!(upc_code, reason, "skipping invalid candidate");
                    stats.processed += 1;
                    stats.skipped += 1;
                }
                Err(error) => {
                    error!(upc_code, %error, "failed to import candidate");
                    stats.errors += 1;
                }
            }
        }

        stats
    }

    async fn import_manual_batch(
        &self,
        records: Vec<serde_json::Value>,
        dry_run: bool,
    ) -> ImportStats {
        let mut stats = ImportStats::default();

        for value in records {
            let record: ManualProduct = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(error) => {
                    warn!(%error, "skipping import record with missing fields");
                    stats.processed += 1;
                    stats.skipped += 1;
                    continue;
                }
            };

            let upc = record.upc.clone();
            match self.import_manual_record(record, dry_run).await {
                // Manual records are pre-classified, never degraded.
                Ok(outcome) => stats.record(CandidateImport::clean(outcome)),
                Err(CoreError::InvalidCandidate(reason)) => {
                    warn!(upc, reason, "skipping invalid import record");
                    stats.processed += 1;
                    stats.skipped += 1;
                }
                Err(error) => {
                    error!(upc, %error, "failed to import record");
                    stats.errors += 1;
                }
            }
        }

        stats
    }

    async fn import_from_upc(&self, upc_code: String) -> Result<Option<Product>, CoreError> {
        let upc_code = normalize_upc(&upc_code)?;

        if let Some(product) = self
            .catalog_repository
            .find_product_by_upc(upc_code.clone())
            .await?
        {
            return Ok(Some(product));
        }

        let Some(candidate) = self.sources.fetch_first(&upc_code).await else {
            info!(upc_code, "product not found in any external source");
            return Ok(None);
        };

        info!(upc_code, source = %candidate.source, "importing product from external source");
        self.import_candidate(candidate, false).await?;
        self.catalog_repository.find_product_by_upc(upc_code).await
    }

    async fn lookup_product(&self, upc_code: String) -> Result<Option<ProductDetail>, CoreError> {
        let Some(product) = self.import_from_upc(upc_code).await? else {
            return Ok(None);
        };

        let ingredients = self
            .catalog_repository
            .fetch_ingredients(product.id)
            .await?;

        Ok(Some(ProductDetail {
            product,
            ingredients,
        }))
    }

    async fn create_product_from_image(
        &self,
        name: String,
        upc_code: String,
        image: Vec<u8>,
        mime: ImageMime,
        image_ref: Option<String>,
    ) -> Result<Product, CoreError> {
        let upc_code = normalize_upc(&upc_code)?;
        let name = normalize_text(&name);
        if name.is_empty() {
            return Err(CoreError::InvalidCandidate(
                "missing product name".to_string(),
            ));
        }

        if self
            .catalog_repository
            .find_product_by_upc(upc_code.clone())
            .await?
            .is_some()
        {
            return Err(CoreError::DuplicateProduct);
        }

        let report = self.analyze_ingredient_image(image, mime).await?;
        let rows = report_to_ingredients(&report);

        let product = Product::new(name, upc_code, image_ref);
        self.catalog_repository
            .create_product_with_ingredients(product, rows)
            .await
    }

    async fn scrape(
        &self,
        source: SourceId,
        limit: usize,
        category: Option<String>,
    ) -> Result<Vec<ProductCandidate>, CoreError> {
        self.sources.search(source, limit, category).await
    }

    async fn scrape_and_import(
        &self,
        source: SourceId,
        limit: usize,
        category: Option<String>,
        dry_run: bool,
    ) -> Result<ImportStats, CoreError> {
        let candidates = self.scrape(source, limit, category).await?;
        info!(%source, count = candidates.len(), "fetched candidates to process");

        Ok(self.import_batch(candidates, dry_run).await)
    }

    async fn product_count(&self) -> Result<u64, CoreError> {
        self.catalog_repository.count_products().await
    }

    async fn run_scheduled_batch(&self, dry_run: bool) -> Result<ImportStats, CoreError> {
        let product_count = self.product_count().await?;
        let (limit, categories) = scrape_plan(product_count);
        info!(
            product_count,
            limit,
            batches = categories.len(),
            "starting scheduled scrape"
        );

        let mut total = ImportStats::default();
        for category in categories {
            let label = category.as_deref().unwrap_or("(all)").to_string();
            match self
                .scrape_and_import(SourceId::OpenFoodFacts, limit, category, dry_run)
                .await
            {
                Ok(stats) => {
                    info!(
                        category = label,
                        created = stats.created,
                        updated = stats.updated,
                        "category batch complete"
                    );
                    total.merge(stats);
                }
                Err(error) => {
                    // A dead source for one category must not starve the rest
                    // of the rotation.
                    error!(category = label, %error, "category batch failed, continuing");
                    total.errors += 1;
                }
            }
        }

        Ok(total)
    }
}

fn raw_ingredient(raw_text: &str) -> NewIngredient {
    NewIngredient {
        title: raw_text.to_string(),
        allergens: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::domain::{
        catalog::ports::MockCatalogRepository,
        classification::ports::MockClassifierClient,
        ingestion::{ports::MockSourceAdapter, registry::SourceRegistry},
        safety::ports::MockUserAllergyRepository,
    };

    type TestService = Service<
        MockCatalogRepository,
        MockUserAllergyRepository,
        MockClassifierClient,
        MockSourceAdapter,
        MockSourceAdapter,
        MockSourceAdapter,
    >;

    fn service(catalog: MockCatalogRepository, classifier: MockClassifierClient) -> TestService {
        service_with_sources(
            catalog,
            classifier,
            MockSourceAdapter::new(),
            MockSourceAdapter::new(),
            MockSourceAdapter::new(),
        )
    }

    fn service_with_sources(
        catalog: MockCatalogRepository,
        classifier: MockClassifierClient,
        primary: MockSourceAdapter,
        rewe: MockSourceAdapter,
        edeka: MockSourceAdapter,
    ) -> TestService {
        Service::new(
            catalog,
            MockUserAllergyRepository::new(),
            classifier,
            SourceRegistry::new(primary, rewe, edeka),
        )
    }

    fn candidate(upc: &str, text: Option<&str>) -> ProductCandidate {
        ProductCandidate {
            upc_code: upc.to_string(),
            name: "Club Mate".to_string(),
            ingredients_text: text.map(String::from),
            image_ingredients_url: None,
            source: SourceId::OpenFoodFacts,
        }
    }

    fn stored_product(upc: &str) -> Product {
        Product::new("Club Mate".to_string(), upc.to_string(), None)
    }

    fn three_ingredient_completion() -> String {
        json!({
            "ingredients": [
                {"name": "water", "allergens": []},
                {"name": "sugar", "allergens": []},
                {"name": "caffeine", "allergens": []},
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn new_candidate_is_created_with_classified_ingredients() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_product_by_upc()
            .returning(|_| Box::pin(async move { Ok(None) }));
        catalog
            .expect_create_product_with_ingredients()
            .withf(|product, rows| {
                product.upc_code == "4000177712"
                    && rows.len() == 3
                    && rows.iter().all(|row| row.allergens.is_empty())
            })
            .returning(|product, _| Box::pin(async move { Ok(product) }));

        let mut classifier = MockClassifierClient::new();
        classifier
            .expect_complete_text()
            .returning(|_, _| Box::pin(async move { Ok(three_ingredient_completion()) }));

        let import = service(catalog, classifier)
            .import_candidate(candidate("4000177712", Some("Wasser, Zucker, Koffein")), false)
            .await
            .unwrap();

        assert_eq!(import.outcome, ImportOutcome::Created);
        assert!(!import.degraded);
    }

    #[tokio::test]
    async fn existing_product_with_ingredients_is_skipped() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_product_by_upc()
            .returning(|upc| Box::pin(async move { Ok(Some(stored_product(&upc))) }));
        catalog.expect_count_ingredients().returning(|_| Box::pin(async move { Ok(3) }));

        // No classifier expectations: a skip must not classify anything.
        let import = service(catalog, MockClassifierClient::new())
            .import_candidate(candidate("4000177712", Some("Wasser, Zucker, Koffein")), false)
            .await
            .unwrap();

        assert_eq!(import.outcome, ImportOutcome::Skipped);
    }

    #[tokio::test]
    async fn classifier_failure_falls_back_to_raw_text_ingredient() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        catalog
            .expect_create_product_with_ingredients()
            .withf(|_, rows| {
                rows.len() == 1
                    && rows[0].title == "Wasser, Zucker, Koffein"
                    && rows[0].allergens.is_empty()
            })
            .returning(|product, _| Box::pin(async move { Ok(product) }));

        let mut classifier = MockClassifierClient::new();
        classifier.expect_complete_text().returning(|_, _| {
            Box::pin(async move { Err(CoreError::ClassificationUnavailable("timeout".to_string())) })
        });

        let import = service(catalog, classifier)
            .import_candidate(candidate("4000177712", Some("Wasser, Zucker, Koffein")), false)
            .await
            .unwrap();

        assert_eq!(import.outcome, ImportOutcome::Created);
        assert!(import.degraded);
    }

    #[tokio::test]
    async fn empty_classifier_report_also_falls_back_to_raw_text() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        catalog
            .expect_create_product_with_ingredients()
            .withf(|_, rows| rows.len() == 1 && rows[0].title == "Wasser")
            .returning(|product, _| Box::pin(async move { Ok(product) }));

        let mut classifier = MockClassifierClient::new();
        classifier
            .expect_complete_text()
            .returning(|_, _| Box::pin(async move { Ok(r#"{"ingredients":[]}"#.to_string()) }));

        let import = service(catalog, classifier)
            .import_candidate(candidate("4000177712", Some("Wasser")), false)
            .await
            .unwrap();

        assert_eq!(import.outcome, ImportOutcome::Created);
        assert!(import.degraded);
    }

    #[tokio::test]
    async fn existing_product_without_ingredients_is_updated() {
        let existing = stored_product("4000177712");
        let existing_id = existing.id;

        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_product_by_upc()
            .returning(move |_| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });
        catalog.expect_count_ingredients().returning(|_| Box::pin(async move { Ok(0) }));
        catalog
            .expect_add_ingredients()
            .withf(move |product_id, rows| *product_id == existing_id && rows.len() == 3)
            .returning(|_, _| Box::pin(async move { Ok(()) }));

        let mut classifier = MockClassifierClient::new();
        classifier
            .expect_complete_text()
            .returning(|_, _| Box::pin(async move { Ok(three_ingredient_completion()) }));

        let import = service(catalog, classifier)
            .import_candidate(candidate("4000177712", Some("Wasser, Zucker, Koffein")), false)
            .await
            .unwrap();

        assert_eq!(import.outcome, ImportOutcome::Updated);
        assert!(!import.degraded);
    }

    #[tokio::test]
    async fn dry_run_reports_without_writing() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));

        // No create/classify expectations: any write attempt panics the mock.
        let import = service(catalog, MockClassifierClient::new())
            .import_candidate(candidate("4000177712", Some("Wasser")), true)
            .await
            .unwrap();

        assert_eq!(import.outcome, ImportOutcome::Created);
    }

    #[tokio::test]
    async fn concurrent_duplicate_insert_counts_as_skipped() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        catalog
            .expect_create_product_with_ingredients()
            .returning(|_, _| Box::pin(async move { Err(CoreError::DuplicateProduct) }));

        let import = service(catalog, MockClassifierClient::new())
            .import_candidate(candidate("4000177712", None), false)
            .await
            .unwrap();

        assert_eq!(import.outcome, ImportOutcome::Skipped);
    }

    #[tokio::test]
    async fn batch_counts_invalid_and_failed_candidates_without_aborting() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        catalog
            .expect_create_product_with_ingredients()
            .returning(|product, _| {
                Box::pin(async move {
                    if product.upc_code == "4000177712" {
                        Ok(product)
                    } else {
                        Err(CoreError::InternalServerError)
                    }
                })
            });

        let batch = vec![
            candidate("4000177712", None),
            candidate("not-a-upc", None),
            candidate("4000177713", None),
        ];

        let stats = service(catalog, MockClassifierClient::new())
            .import_batch(batch, false)
            .await;

        assert_eq!(stats.created, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.processed, 2);
    }

    #[tokio::test]
    async fn batch_stats_count_raw_text_fallbacks() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        catalog
            .expect_create_product_with_ingredients()
            .returning(|product, _| Box::pin(async move { Ok(product) }));

        let mut classifier = MockClassifierClient::new();
        classifier.expect_complete_text().returning(|_, _| {
            Box::pin(async move { Err(CoreError::ClassificationUnavailable("timeout".to_string())) })
        });

        let batch = vec![
            candidate("4000177712", Some("Wasser, Zucker")),
            candidate("4000177713", None),
        ];

        let stats = service(catalog, classifier)
            .import_batch(batch, false)
            .await;

        assert_eq!(stats.created, 2);
        assert_eq!(stats.degraded, 1);
    }

    #[tokio::test]
    async fn scheduled_batch_survives_a_failing_category() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_count_products().returning(|| Box::pin(async move { Ok(0) }));

        let (_, planned) = scrape_plan(0);
        let searches = AtomicUsize::new(0);
        let mut primary = MockSourceAdapter::new();
        primary
            .expect_search()
            .times(planned.len())
            .returning(move |_, _| {
                // The first category fails, the rest of the rotation must run.
                let first = searches.fetch_add(1, Ordering::SeqCst) == 0;
                Box::pin(async move {
                    if first {
                        Err(CoreError::SourceUnavailable("http 503".to_string()))
                    } else {
                        Ok(Vec::new())
                    }
                })
            });

        let stats = service_with_sources(
            catalog,
            MockClassifierClient::new(),
            primary,
            MockSourceAdapter::new(),
            MockSourceAdapter::new(),
        )
        .run_scheduled_batch(false)
        .await
        .unwrap();

        assert_eq!(stats.errors, 1);
        assert_eq!(stats.processed, 0);
    }

    #[tokio::test]
    async fn manual_batch_skips_malformed_records() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        catalog
            .expect_create_product_with_ingredients()
            .withf(|product, rows| {
                product.name == "Haribo Goldbären"
                    && rows.len() == 1
                    && rows[0].allergens == vec!["wheat"]
            })
            .returning(|product, _| Box::pin(async move { Ok(product) }));

        let records = vec![
            json!({
                "name": "Haribo Goldbären",
                "upc": "4001686301234",
                "ingredients": [
                    {"name": "glucose syrup", "allergens": ["wheat"]},
                    {"allergens": ["milk"]},
                ]
            }),
            json!({"name": "No UPC product"}),
        ];

        let stats = service(catalog, MockClassifierClient::new())
            .import_manual_batch(records, false)
            .await;

        assert_eq!(stats.created, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 0);
    }

    #[tokio::test]
    async fn import_from_upc_prefers_stored_product() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_find_product_by_upc()
            .returning(|upc| Box::pin(async move { Ok(Some(stored_product(&upc))) }));

        // Adapters carry no expectations: the catalog hit must short-circuit.
        let product = service(catalog, MockClassifierClient::new())
            .import_from_upc("4000177712".to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(product.upc_code, "4000177712");
    }

    #[tokio::test]
    async fn import_from_upc_imports_first_adapter_hit() {
        let calls = AtomicUsize::new(0);
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(move |upc| {
            // Misses until the candidate import has been persisted.
            let miss = calls.fetch_add(1, Ordering::SeqCst) < 2;
            Box::pin(async move {
                if miss {
                    Ok(None)
                } else {
                    Ok(Some(stored_product(&upc)))
                }
            })
        });
        catalog
            .expect_create_product_with_ingredients()
            .returning(|product, _| Box::pin(async move { Ok(product) }));

        let mut primary = MockSourceAdapter::new();
        primary
            .expect_fetch_by_upc()
            .returning(|upc| Box::pin(async move { Ok(Some(candidate(&upc, None))) }));

        let product = service_with_sources(
            catalog,
            MockClassifierClient::new(),
            primary,
            MockSourceAdapter::new(),
            MockSourceAdapter::new(),
        )
        .import_from_upc("4000177712".to_string())
        .await
        .unwrap()
        .unwrap();

        assert_eq!(product.upc_code, "4000177712");
    }

    #[tokio::test]
    async fn import_from_upc_returns_none_when_all_sources_miss() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));

        let mut primary = MockSourceAdapter::new();
        primary.expect_id().return_const(SourceId::OpenFoodFacts);
        primary.expect_fetch_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        let mut rewe = MockSourceAdapter::new();
        rewe.expect_id().return_const(SourceId::Rewe);
        rewe.expect_fetch_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        let mut edeka = MockSourceAdapter::new();
        edeka.expect_id().return_const(SourceId::Edeka);
        edeka.expect_fetch_by_upc().returning(|_| Box::pin(async move { Ok(None) }));

        let result = service_with_sources(
            catalog,
            MockClassifierClient::new(),
            primary,
            rewe,
            edeka,
        )
        .import_from_upc("4000177712".to_string())
        .await
        .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn image_classification_failure_aborts_creation() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_find_product_by_upc().returning(|_| Box::pin(async move { Ok(None) }));

        let mut classifier = MockClassifierClient::new();
        classifier.expect_complete_with_image().returning(|_, _, _, _| {
            Box::pin(async move { Err(CoreError::ClassificationUnavailable("timeout".to_string())) })
        });

        let result = service(catalog, classifier)
            .create_product_from_image(
                "Coca Cola".to_string(),
                "049000028391".to_string(),
                vec![0xff, 0xd8],
                ImageMime::Jpeg,
                None,
            )
            .await;

        assert!(matches!(
            result,
            Err(CoreError::ClassificationUnavailable(_))
        ));
    }
}
