use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

/// External product data sources, in fallback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    OpenFoodFacts,
    Rewe,
    Edeka,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::OpenFoodFacts => "openfoodfacts",
            SourceId::Rewe => "rewe",
            SourceId::Edeka => "edeka",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openfoodfacts" => Ok(SourceId::OpenFoodFacts),
            "rewe" => Ok(SourceId::Rewe),
            "edeka" => Ok(SourceId::Edeka),
            other => Err(CoreError::Invalid(format!("unknown source: {other}"))),
        }
    }
}

/// An unvalidated product record proposed for import, from any source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub upc_code: String,
    pub name: String,
    pub ingredients_text: Option<String>,
    pub image_ingredients_url: Option<String>,
    pub source: SourceId,
}

/// Outcome of importing a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Created,
    Updated,
    Skipped,
}

/// Result of importing one candidate: the outcome plus whether the stored
/// ingredients came from the raw-text degradation instead of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateImport {
    pub outcome: ImportOutcome,
    pub degraded: bool,
}

impl CandidateImport {
    /// An import whose ingredients did not need the raw-text fallback.
    pub fn clean(outcome: ImportOutcome) -> Self {
        Self {
            outcome,
            degraded: false,
        }
    }
}

/// Completion summary of a batch import. Batch operations always return one
/// of these, even when every item failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub processed: u64,
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
    pub errors: u64,
    /// Imports that fell back to storing raw ingredient text.
    pub degraded: u64,
}

impl ImportStats {
    pub fn record(&mut self, import: CandidateImport) {
        self.processed += 1;
        if import.degraded {
            self.degraded += 1;
        }
        match import.outcome {
            ImportOutcome::Created => self.created += 1,
            ImportOutcome::Updated => self.updated += 1,
            ImportOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: ImportStats) {
        self.processed += other.processed;
        self.created += other.created;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.errors += other.errors;
        self.degraded += other.degraded;
    }
}

/// One record of the manual JSON import format: pre-classified ingredients,
/// no classifier involved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManualProduct {
    pub name: String,
    pub upc: String,
    pub ingredients: Vec<ManualIngredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManualIngredient {
    pub name: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
}

/// OpenFoodFacts category slugs with their German display names.
pub fn available_categories() -> &'static [(&'static str, &'static str)] {
    &[
        ("beverages", "Getränke"),
        ("dairy", "Milchprodukte"),
        ("snacks", "Snacks"),
        ("cereals-and-potatoes", "Getreide und Kartoffeln"),
        ("meat", "Fleisch"),
        ("fish", "Fisch"),
        ("fruits-and-vegetables", "Obst und Gemüse"),
        ("frozen-foods", "Tiefkühlkost"),
        ("bakery", "Backwaren"),
        ("confectionery", "Süßwaren"),
    ]
}

/// Catalog-size-dependent scraping plan: how many products per category, and
/// which categories the scheduled rotation visits.
pub fn scrape_plan(product_count: u64) -> (usize, Vec<Option<String>>) {
    let slug = |s: &str| Some(s.to_string());

    if product_count < 500 {
        let categories = vec![
            None,
            slug("beverages"),
            slug("dairy"),
            slug("snacks"),
            slug("cereals-and-potatoes"),
            slug("fruits-and-vegetables"),
            slug("bakery"),
            slug("confectionery"),
        ];
        (50, categories)
    } else if product_count < 2000 {
        let categories = vec![
            slug("beverages"),
            slug("dairy"),
            slug("snacks"),
            slug("bakery"),
            slug("confectionery"),
        ];
        (30, categories)
    } else {
        (20, vec![slug("beverages"), slug("snacks")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_plan_shrinks_as_the_catalog_grows() {
        let (bootstrap_limit, bootstrap) = scrape_plan(0);
        let (growth_limit, growth) = scrape_plan(500);
        let (maintenance_limit, maintenance) = scrape_plan(2000);

        assert_eq!(bootstrap_limit, 50);
        assert_eq!(growth_limit, 30);
        assert_eq!(maintenance_limit, 20);
        assert!(bootstrap.len() > growth.len());
        assert!(growth.len() > maintenance.len());
    }

    #[test]
    fn stats_count_degraded_imports_separately() {
        let mut stats = ImportStats::default();
        stats.record(CandidateImport::clean(ImportOutcome::Created));
        stats.record(CandidateImport {
            outcome: ImportOutcome::Created,
            degraded: true,
        });

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.created, 2);
        assert_eq!(stats.degraded, 1);
    }
}
