use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingestion::{
        ports::SourceAdapter,
        value_objects::{ProductCandidate, SourceId},
    },
    text::{looks_like_german, normalize_text},
};

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
const MAX_PAGE_SIZE: usize = 50;
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);
/// Pause between search pages, keeping request rates polite.
const PAGE_DELAY: Duration = Duration::from_millis(100);

const FIELDS: &str =
    "code,product_name,product_name_de,ingredients_text,ingredients_text_de,image_ingredients_url";

/// Adapter for the public OpenFoodFacts API, restricted to products sold in
/// Germany. Records whose ingredient text does not read as German are
/// discarded during search.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsAdapter {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: u8,
    product: Option<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    code: Option<String>,
    product_name: Option<String>,
    product_name_de: Option<String>,
    ingredients_text: Option<String>,
    ingredients_text_de: Option<String>,
    image_ingredients_url: Option<String>,
}

impl OffProduct {
    fn display_name(&self) -> Option<String> {
        let raw = self
            .product_name_de
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.product_name.as_deref())?;

        let name = normalize_text(raw);
        (!name.is_empty()).then_some(name)
    }

    fn german_ingredients(&self) -> Option<&str> {
        self.ingredients_text_de
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    fn ingredients(&self) -> Option<&str> {
        self.german_ingredients().or(self
            .ingredients_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty()))
    }
}

impl Default for OpenFoodFactsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenFoodFactsAdapter {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn search_page(
        &self,
        page: usize,
        page_size: usize,
        category: Option<&str>,
    ) -> Result<SearchResponse, CoreError> {
        let mut query: Vec<(&str, String)> = vec![
            ("action", "process".to_string()),
            ("tagtype_0", "countries".to_string()),
            ("tag_contains_0", "contains".to_string()),
            ("tag_0", "germany".to_string()),
            ("sort_by", "unique_scans_n".to_string()),
            ("page_size", page_size.to_string()),
            ("page", page.to_string()),
            ("json", "1".to_string()),
            ("fields", FIELDS.to_string()),
        ];
        if let Some(category) = category {
            query.push(("tagtype_1", "categories".to_string()));
            query.push(("tag_contains_1", "contains".to_string()));
            query.push(("tag_1", category.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/cgi/search.pl", self.base_url))
            .query(&query)
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| CoreError::SourceUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| CoreError::SourceUnavailable(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| CoreError::SourceUnavailable(e.to_string()))
    }

    fn process_record(&self, record: OffProduct) -> Option<ProductCandidate> {
        let upc_code = record.code.as_deref()?.trim();
        if upc_code.is_empty() {
            return None;
        }
        let name = record.display_name()?;

        // The dedicated German field is trusted as-is; the generic field must
        // pass the language heuristic.
        let text = match record.german_ingredients() {
            Some(text) => text,
            None => {
                let text = record.ingredients()?;
                if !looks_like_german(text) {
                    debug!(upc_code, "discarding product with non-German ingredient text");
                    return None;
                }
                text
            }
        };

        Some(ProductCandidate {
            upc_code: upc_code.to_string(),
            name,
            ingredients_text: Some(text.to_string()),
            image_ingredients_url: record.image_ingredients_url.clone(),
            source: SourceId::OpenFoodFacts,
        })
    }
}

impl SourceAdapter for OpenFoodFactsAdapter {
    fn id(&self) -> SourceId {
        SourceId::OpenFoodFacts
    }

    async fn fetch_by_upc(&self, upc_code: String) -> Result<Option<ProductCandidate>, CoreError> {
        let response = self
            .client
            .get(format!("{}/api/v2/product/{upc_code}.json", self.base_url))
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await
            .map_err(|e| CoreError::SourceUnavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|e| CoreError::SourceUnavailable(e.to_string()))?;

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| CoreError::SourceUnavailable(e.to_string()))?;

        if lookup.status != 1 {
            return Ok(None);
        }
        let Some(record) = lookup.product else {
            return Ok(None);
        };
        let Some(name) = record.display_name() else {
            return Ok(None);
        };

        Ok(Some(ProductCandidate {
            upc_code,
            name,
            ingredients_text: record.ingredients().map(String::from),
            image_ingredients_url: record.image_ingredients_url.clone(),
            source: SourceId::OpenFoodFacts,
        }))
    }

    /// Pages through search results until `limit` candidates survive the
    /// language filter or the results run out. A page failure after the first
    /// returns the partial result set instead of an error.
    async fn search(
        &self,
        limit: usize,
        category: Option<String>,
    ) -> Result<Vec<ProductCandidate>, CoreError> {
        let page_size = limit.min(MAX_PAGE_SIZE).max(1);
        let mut candidates: Vec<ProductCandidate> = Vec::new();
        let mut page = 1;

        while candidates.len() < limit {
            if page > 1 {
                tokio::time::sleep(PAGE_DELAY).await;
            }

            let response = match self.search_page(page, page_size, category.as_deref()).await {
                Ok(response) => response,
                Err(error) if candidates.is_empty() => return Err(error),
                Err(error) => {
                    warn!(%error, page, "search page failed, returning partial results");
                    break;
                }
            };

            let fetched = response.products.len();
            for record in response.products {
                if candidates.len() >= limit {
                    break;
                }
                if let Some(candidate) = self.process_record(record) {
                    candidates.push(candidate);
                }
            }

            // Pages can come back short of `page_size` while more results
            // remain, so only an empty page ends the search.
            if fetched == 0 {
                break;
            }
            page += 1;
        }

        Ok(candidates)
    }
}
