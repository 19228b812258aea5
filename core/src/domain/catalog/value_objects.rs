use serde::{Deserialize, Serialize};

use crate::domain::catalog::entities::{Allergen, Ingredient, Product};

/// An ingredient row to persist, with the allergen names it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub title: String,
    pub allergens: Vec<String>,
}

/// An ingredient loaded together with its allergens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientWithAllergens {
    pub ingredient: Ingredient,
    pub allergens: Vec<Allergen>,
}

/// A product with its full ingredient and allergen tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub ingredients: Vec<IngredientWithAllergens>,
}
