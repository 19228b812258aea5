use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    safety::{entities::UserAllergy, value_objects::SafetyReport},
};

#[cfg_attr(test, mockall::automock)]
pub trait UserAllergyRepository: Send + Sync {
    fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<UserAllergy>, CoreError>> + Send;

    fn create(
        &self,
        allergy: UserAllergy,
    ) -> impl Future<Output = Result<UserAllergy, CoreError>> + Send;

    fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        allergy_text: String,
    ) -> impl Future<Output = Result<UserAllergy, CoreError>> + Send;

    fn delete(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for allergy management and product safety checks.
#[cfg_attr(test, mockall::automock)]
pub trait SafetyService: Send + Sync {
    /// Records a new allergy term. Rejects blank terms, terms over 500
    /// characters, and terms overlapping an already-recorded one.
    fn add_allergy(
        &self,
        user_id: Uuid,
        allergy_text: String,
    ) -> impl Future<Output = Result<UserAllergy, CoreError>> + Send;

    fn update_allergy(
        &self,
        id: Uuid,
        user_id: Uuid,
        allergy_text: String,
    ) -> impl Future<Output = Result<UserAllergy, CoreError>> + Send;

    fn remove_allergy(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_allergies(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<UserAllergy>, CoreError>> + Send;

    /// Checks a product against the user's recorded allergies. Resolves the
    /// product on demand via the external sources when the catalog misses;
    /// `None` when no source knows the UPC either.
    fn check_product_safety(
        &self,
        user_id: Uuid,
        upc_code: String,
    ) -> impl Future<Output = Result<Option<SafetyReport>, CoreError>> + Send;

    /// Same check for an ad-hoc list of allergy terms, no account needed.
    fn check_product_safety_for_terms(
        &self,
        upc_code: String,
        terms: Vec<String>,
    ) -> impl Future<Output = Result<Option<SafetyReport>, CoreError>> + Send;
}
