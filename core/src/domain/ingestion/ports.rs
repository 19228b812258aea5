use std::future::Future;

use crate::domain::{
    catalog::{entities::Product, value_objects::ProductDetail},
    classification::entities::ImageMime,
    common::entities::app_errors::CoreError,
    ingestion::value_objects::{CandidateImport, ImportStats, ProductCandidate, SourceId},
};

/// Uniform fetch contract every external data source exposes.
///
/// A source without data answers `None`/empty; [`CoreError::SourceUnavailable`]
/// is reserved for transport failures and is never fatal to the pipeline.
#[cfg_attr(test, mockall::automock)]
pub trait SourceAdapter: Send + Sync {
    fn id(&self) -> SourceId;

    fn fetch_by_upc(
        &self,
        upc_code: String,
    ) -> impl Future<Output = Result<Option<ProductCandidate>, CoreError>> + Send;

    fn search(
        &self,
        limit: usize,
        category: Option<String>,
    ) -> impl Future<Output = Result<Vec<ProductCandidate>, CoreError>> + Send;
}

/// Service trait for the product ingestion pipeline.
#[cfg_attr(test, mockall::automock)]
pub trait IngestionService: Send + Sync {
    /// Imports one candidate. Existing products with ingredients are skipped;
    /// existing products without ingredients are updated when the candidate
    /// supplies ingredient text. `dry_run` performs no writes and reports the
    /// action that would occur. The result carries whether the raw-text
    /// classification fallback was taken.
    fn import_candidate(
        &self,
        candidate: ProductCandidate,
        dry_run: bool,
    ) -> impl Future<Output = Result<CandidateImport, CoreError>> + Send;

    /// Imports a batch of candidates. Per-item failures are counted, never
    /// propagated; the summary is always returned.
    fn import_batch(
        &self,
        candidates: Vec<ProductCandidate>,
        dry_run: bool,
    ) -> impl Future<Output = ImportStats> + Send;

    /// Imports pre-classified records from the manual JSON format. Records
    /// that do not match the expected shape are skipped with a warning.
    fn import_manual_batch(
        &self,
        records: Vec<serde_json::Value>,
        dry_run: bool,
    ) -> impl Future<Output = ImportStats> + Send;

    /// On-demand lookup: returns the stored product, or tries the source
    /// adapters in priority order and imports the first hit. `None` when the
    /// catalog misses and every adapter misses too.
    fn import_from_upc(
        &self,
        upc_code: String,
    ) -> impl Future<Output = Result<Option<Product>, CoreError>> + Send;

    /// [`IngestionService::import_from_upc`] plus the ingredient tree.
    fn lookup_product(
        &self,
        upc_code: String,
    ) -> impl Future<Output = Result<Option<ProductDetail>, CoreError>> + Send;

    /// Creates a product from a label photograph. There is no raw text to
    /// fall back to, so classification failure aborts the creation.
    fn create_product_from_image(
        &self,
        name: String,
        upc_code: String,
        image: Vec<u8>,
        mime: ImageMime,
        image_ref: Option<String>,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    /// Fetches candidates from the named source without importing them.
    fn scrape(
        &self,
        source: SourceId,
        limit: usize,
        category: Option<String>,
    ) -> impl Future<Output = Result<Vec<ProductCandidate>, CoreError>> + Send;

    /// Fetches candidates from the named source and imports them as a batch.
    fn scrape_and_import(
        &self,
        source: SourceId,
        limit: usize,
        category: Option<String>,
        dry_run: bool,
    ) -> impl Future<Output = Result<ImportStats, CoreError>> + Send;

    fn product_count(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    /// Runs the full scheduled rotation: sizes the batch from the current
    /// catalog count, then scrapes and imports every planned category. A
    /// failed category is counted and the rotation continues; only the
    /// initial catalog count is fatal.
    fn run_scheduled_batch(
        &self,
        dry_run: bool,
    ) -> impl Future<Output = Result<ImportStats, CoreError>> + Send;
}
