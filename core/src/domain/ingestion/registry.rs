use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingestion::{
        ports::SourceAdapter,
        value_objects::{ProductCandidate, SourceId},
    },
};

/// The external source adapters, injected at construction time.
///
/// `fetch_first` consults them in fixed priority order: OpenFoodFacts first,
/// then the Rewe and Edeka fallbacks.
#[derive(Debug, Clone)]
pub struct SourceRegistry<P, R, E> {
    openfoodfacts: P,
    rewe: R,
    edeka: E,
}

impl<P, R, E> SourceRegistry<P, R, E>
where
    P: SourceAdapter,
    R: SourceAdapter,
    E: SourceAdapter,
{
    pub fn new(openfoodfacts: P, rewe: R, edeka: E) -> Self {
        Self {
            openfoodfacts,
            rewe,
            edeka,
        }
    }

    pub async fn search(
        &self,
        source: SourceId,
        limit: usize,
        category: Option<String>,
    ) -> Result<Vec<ProductCandidate>, CoreError> {
        match source {
            SourceId::OpenFoodFacts => self.openfoodfacts.search(limit, category).await,
            SourceId::Rewe => self.rewe.search(limit, category).await,
            SourceId::Edeka => self.edeka.search(limit, category).await,
        }
    }

    /// Tries every adapter in priority order until one returns a candidate.
    /// An unavailable source counts as "no data from this source".
    pub async fn fetch_first(&self, upc_code: &str) -> Option<ProductCandidate> {
        if let Some(candidate) = self.try_fetch(&self.openfoodfacts, upc_code).await {
            return Some(candidate);
        }
        if let Some(candidate) = self.try_fetch(&self.rewe, upc_code).await {
            return Some(candidate);
        }
        self.try_fetch(&self.edeka, upc_code).await
    }

    async fn try_fetch(
        &self,
        adapter: &impl SourceAdapter,
        upc_code: &str,
    ) -> Option<ProductCandidate> {
        match adapter.fetch_by_upc(upc_code.to_string()).await {
            Ok(Some(candidate)) => Some(candidate),
            Ok(None) => {
                debug!(source = %adapter.id(), upc_code, "source returned no product");
                None
            }
            Err(error) => {
                warn!(source = %adapter.id(), upc_code, %error, "source lookup failed, trying next");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::ports::MockSourceAdapter;

    fn candidate(upc: &str, source: SourceId) -> ProductCandidate {
        ProductCandidate {
            upc_code: upc.to_string(),
            name: "Testprodukt".to_string(),
            ingredients_text: Some("Wasser, Zucker".to_string()),
            image_ingredients_url: None,
            source,
        }
    }

    fn silent_adapter(id: SourceId) -> MockSourceAdapter {
        let mut adapter = MockSourceAdapter::new();
        adapter.expect_id().return_const(id);
        adapter
    }

    #[tokio::test]
    async fn fetch_first_stops_at_primary_hit() {
        let mut primary = silent_adapter(SourceId::OpenFoodFacts);
        primary
            .expect_fetch_by_upc()
            .returning(|upc| Box::pin(async move { Ok(Some(candidate(&upc, SourceId::OpenFoodFacts))) }));

        // Fallbacks must not be consulted; no fetch expectations set.
        let registry = SourceRegistry::new(
            primary,
            silent_adapter(SourceId::Rewe),
            silent_adapter(SourceId::Edeka),
        );

        let found = registry.fetch_first("4000177712").await.unwrap();
        assert_eq!(found.source, SourceId::OpenFoodFacts);
    }

    #[tokio::test]
    async fn fetch_first_falls_through_misses_and_failures() {
        let mut primary = silent_adapter(SourceId::OpenFoodFacts);
        primary
            .expect_fetch_by_upc()
            .returning(|_| Box::pin(async move { Err(CoreError::SourceUnavailable("timeout".to_string())) }));

        let mut rewe = silent_adapter(SourceId::Rewe);
        rewe.expect_fetch_by_upc().returning(|_| Box::pin(async move { Ok(None) }));

        let mut edeka = silent_adapter(SourceId::Edeka);
        edeka
            .expect_fetch_by_upc()
            .returning(|upc| Box::pin(async move { Ok(Some(candidate(&upc, SourceId::Edeka))) }));

        let registry = SourceRegistry::new(primary, rewe, edeka);

        let found = registry.fetch_first("4000177712").await.unwrap();
        assert_eq!(found.source, SourceId::Edeka);
    }

    #[tokio::test]
    async fn fetch_first_returns_none_when_all_sources_miss() {
        let mut primary = silent_adapter(SourceId::OpenFoodFacts);
        primary.expect_fetch_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        let mut rewe = silent_adapter(SourceId::Rewe);
        rewe.expect_fetch_by_upc().returning(|_| Box::pin(async move { Ok(None) }));
        let mut edeka = silent_adapter(SourceId::Edeka);
        edeka.expect_fetch_by_upc().returning(|_| Box::pin(async move { Ok(None) }));

        let registry = SourceRegistry::new(primary, rewe, edeka);
        assert!(registry.fetch_first("4000177712").await.is_none());
    }
}
