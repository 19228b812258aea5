use tracing::debug;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingestion::{
        ports::SourceAdapter,
        value_objects::{ProductCandidate, SourceId},
    },
};

/// Placeholder adapter for the Rewe online shop. Answers "no data" until the
/// retailer API integration lands.
#[derive(Debug, Clone, Default)]
pub struct ReweAdapter;

impl ReweAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SourceAdapter for ReweAdapter {
    fn id(&self) -> SourceId {
        SourceId::Rewe
    }

    async fn fetch_by_upc(&self, upc_code: String) -> Result<Option<ProductCandidate>, CoreError> {
        debug!(upc_code, "rewe adapter not implemented, no data");
        Ok(None)
    }

    async fn search(
        &self,
        _limit: usize,
        _category: Option<String>,
    ) -> Result<Vec<ProductCandidate>, CoreError> {
        debug!("rewe adapter not implemented, no data");
        Ok(Vec::new())
    }
}
