use serde::{Deserialize, Serialize};

use crate::domain::catalog::entities::Product;

/// Result of matching a user's allergy terms against a product.
///
/// `conflicts` carries the user's terms as they were recorded, so the caller
/// can show the user their own words. `product_allergens` is the normalized,
/// de-duplicated list of every allergen found on the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    pub conflicts: Vec<String>,
    pub product_allergens: Vec<String>,
}

/// A verdict together with the product it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub product: Product,
    pub verdict: SafetyVerdict,
}
