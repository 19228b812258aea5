use crate::domain::catalog::entities::{Allergen, Ingredient, Product};
use crate::entity::allergens::Model as AllergenModel;
use crate::entity::ingredients::Model as IngredientModel;
use crate::entity::products::Model as ProductModel;

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Product {
            id: model.id,
            name: model.name,
            upc_code: model.upc_code,
            ingredient_image_path: model.ingredient_image_path,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<&ProductModel> for Product {
    fn from(model: &ProductModel) -> Self {
        Product {
            id: model.id,
            name: model.name.clone(),
            upc_code: model.upc_code.clone(),
            ingredient_image_path: model.ingredient_image_path.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<IngredientModel> for Ingredient {
    fn from(model: IngredientModel) -> Self {
        Ingredient {
            id: model.id,
            product_id: model.product_id,
            title: model.title,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<&IngredientModel> for Ingredient {
    fn from(model: &IngredientModel) -> Self {
        Ingredient {
            id: model.id,
            product_id: model.product_id,
            title: model.title.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<AllergenModel> for Allergen {
    fn from(model: AllergenModel) -> Self {
        Allergen {
            id: model.id,
            ingredient_id: model.ingredient_id,
            name: model.name,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<&AllergenModel> for Allergen {
    fn from(model: &AllergenModel) -> Self {
        Allergen {
            id: model.id,
            ingredient_id: model.ingredient_id,
            name: model.name.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}
