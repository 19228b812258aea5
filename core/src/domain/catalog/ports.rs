use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    catalog::{
        entities::Product,
        value_objects::{IngredientWithAllergens, NewIngredient},
    },
    common::entities::app_errors::CoreError,
};

/// Repository trait for product catalog persistence.
///
/// `create_product_with_ingredients` and `add_ingredients` are atomic: either
/// every row lands or none does. A unique-key collision on the product UPC
/// surfaces as [`CoreError::DuplicateProduct`].
#[cfg_attr(test, mockall::automock)]
pub trait CatalogRepository: Send + Sync {
    fn find_product_by_upc(
        &self,
        upc_code: String,
    ) -> impl Future<Output = Result<Option<Product>, CoreError>> + Send;

    fn count_products(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn count_ingredients(
        &self,
        product_id: Uuid,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn create_product_with_ingredients(
        &self,
        product: Product,
        ingredients: Vec<NewIngredient>,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn add_ingredients(
        &self,
        product_id: Uuid,
        ingredients: Vec<NewIngredient>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn fetch_ingredients(
        &self,
        product_id: Uuid,
    ) -> impl Future<Output = Result<Vec<IngredientWithAllergens>, CoreError>> + Send;

    fn product_allergen_terms(
        &self,
        product_id: Uuid,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}
