use crate::domain::{
    catalog::ports::CatalogRepository,
    classification::ports::ClassifierClient,
    ingestion::{ports::SourceAdapter, registry::SourceRegistry},
    safety::ports::UserAllergyRepository,
};

/// The aggregate service all domain service traits are implemented on.
///
/// Collaborators are injected at construction time; there is no global
/// registry. `P`, `R` and `E` are the external source adapters in fixed
/// fallback priority order.
#[derive(Debug, Clone)]
pub struct Service<C, U, L, P, R, E> {
    pub(crate) catalog_repository: C,
    pub(crate) user_allergy_repository: U,
    pub(crate) classifier_client: L,
    pub(crate) sources: SourceRegistry<P, R, E>,
}

impl<C, U, L, P, R, E> Service<C, U, L, P, R, E>
where
    C: CatalogRepository,
    U: UserAllergyRepository,
    L: ClassifierClient,
    P: SourceAdapter,
    R: SourceAdapter,
    E: SourceAdapter,
{
    pub fn new(
        catalog_repository: C,
        user_allergy_repository: U,
        classifier_client: L,
        sources: SourceRegistry<P, R, E>,
    ) -> Self {
        Self {
            catalog_repository,
            user_allergy_repository,
            classifier_client,
            sources,
        }
    }
}
