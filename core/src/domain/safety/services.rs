use tracing::info;
use uuid::Uuid;

use crate::domain::{
    catalog::ports::CatalogRepository,
    classification::ports::ClassifierClient,
    common::{entities::app_errors::CoreError, services::Service},
    ingestion::ports::{IngestionService, SourceAdapter},
    safety::{
        entities::UserAllergy,
        matcher::{check_safety, terms_conflict},
        ports::{SafetyService, UserAllergyRepository},
        value_objects::SafetyReport,
    },
};

/// Upper bound on one allergy term, matching the column width.
const MAX_ALLERGY_LEN: usize = 500;

impl<C, U, L, P, R, E> Service<C, U, L, P, R, E>
where
    C: CatalogRepository,
    U: UserAllergyRepository,
    L: ClassifierClient,
    P: SourceAdapter,
    R: SourceAdapter,
    E: SourceAdapter,
{
    fn validate_allergy_text(allergy_text: &str) -> Result<String, CoreError> {
        let trimmed = allergy_text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Invalid("allergy text must not be blank".to_string()));
        }
        if trimmed.chars().count() > MAX_ALLERGY_LEN {
            return Err(CoreError::Invalid(format!(
                "allergy text exceeds {MAX_ALLERGY_LEN} characters"
            )));
        }

        Ok(trimmed.to_string())
    }

    /// Rejects a term that overlaps an existing record for the same user,
    /// optionally ignoring one record (the one being updated).
    async fn ensure_no_overlap(
        &self,
        user_id: Uuid,
        allergy_text: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), CoreError> {
        let existing = self.user_allergy_repository.list_by_user(user_id).await?;

        let overlapping = existing
            .iter()
            .filter(|record| exclude != Some(record.id))
            .any(|record| terms_conflict(&record.allergy_text, allergy_text));

        if overlapping {
            return Err(CoreError::DuplicateAllergy);
        }

        Ok(())
    }
}

impl<C, U, L, P, R, E> SafetyService for Service<C, U, L, P, R, E>
where
    C: CatalogRepository,
    U: UserAllergyRepository,
    L: ClassifierClient,
    P: SourceAdapter,
    R: SourceAdapter,
    E: SourceAdapter,
{
    async fn add_allergy(
        &self,
        user_id: Uuid,
        allergy_text: String,
    ) -> Result<UserAllergy, CoreError> {
        let allergy_text = Self::validate_allergy_text(&allergy_text)?;
        self.ensure_no_overlap(user_id, &allergy_text, None).await?;

        self.user_allergy_repository
            .create(UserAllergy::new(user_id, allergy_text))
            .await
    }

    async fn update_allergy(
        &self,
        id: Uuid,
        user_id: Uuid,
        allergy_text: String,
    ) -> Result<UserAllergy, CoreError> {
        let allergy_text = Self::validate_allergy_text(&allergy_text)?;
        self.ensure_no_overlap(user_id, &allergy_text, Some(id))
            .await?;

        self.user_allergy_repository
            .update(id, user_id, allergy_text)
            .await
    }

    async fn remove_allergy(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        self.user_allergy_repository.delete(id, user_id).await
    }

    async fn list_allergies(&self, user_id: Uuid) -> Result<Vec<UserAllergy>, CoreError> {
        self.user_allergy_repository.list_by_user(user_id).await
    }

    async fn check_product_safety(
        &self,
        user_id: Uuid,
        upc_code: String,
    ) -> Result<Option<SafetyReport>, CoreError> {
        let terms = self
            .user_allergy_repository
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|record| record.allergy_text)
            .collect();

        self.check_product_safety_for_terms(upc_code, terms).await
    }

    async fn check_product_safety_for_terms(
        &self,
        upc_code: String,
        terms: Vec<String>,
    ) -> Result<Option<SafetyReport>, CoreError> {
        let Some(product) = self.import_from_upc(upc_code).await? else {
            return Ok(None);
        };

        let allergens = self
            .catalog_repository
            .product_allergen_terms(product.id)
            .await?;

        let verdict = check_safety(&terms, &allergens);
        info!(
            upc_code = product.upc_code,
            is_safe = verdict.is_safe,
            conflicts = verdict.conflicts.len(),
            "product safety check complete"
        );

        Ok(Some(SafetyReport { product, verdict }))
    }
}
