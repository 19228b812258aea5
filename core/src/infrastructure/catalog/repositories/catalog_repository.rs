use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        catalog::{
            entities::{Allergen, Ingredient, Product},
            ports::CatalogRepository,
            value_objects::{IngredientWithAllergens, NewIngredient},
        },
        common::entities::app_errors::CoreError,
    },
    entity::{
        allergens::{
            ActiveModel as AllergenActiveModel, Column as AllergenColumn,
            Entity as AllergenEntity,
        },
        ingredients::{
            ActiveModel as IngredientActiveModel, Column as IngredientColumn,
            Entity as IngredientEntity,
        },
        products::{
            ActiveModel as ProductActiveModel, Column as ProductColumn, Entity as ProductEntity,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PostgresCatalogRepository {
    pub db: DatabaseConnection,
}

impl PostgresCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert_ingredient_rows(
        conn: &impl ConnectionTrait,
        product_id: Uuid,
        rows: Vec<NewIngredient>,
    ) -> Result<(), CoreError> {
        for row in rows {
            let ingredient = Ingredient::new(product_id, row.title);
            IngredientEntity::insert(IngredientActiveModel {
                id: Set(ingredient.id),
                product_id: Set(ingredient.product_id),
                title: Set(ingredient.title.clone()),
                created_at: Set(ingredient.created_at.fixed_offset()),
                updated_at: Set(ingredient.updated_at.fixed_offset()),
            })
            .exec(conn)
            .await
            .map_err(|e| {
                error!("Failed to create ingredient: {}", e);
                CoreError::InternalServerError
            })?;

            for name in row.allergens {
                let allergen = Allergen::new(ingredient.id, name);
                AllergenEntity::insert(AllergenActiveModel {
                    id: Set(allergen.id),
                    ingredient_id: Set(allergen.ingredient_id),
                    name: Set(allergen.name),
                    created_at: Set(allergen.created_at.fixed_offset()),
                    updated_at: Set(allergen.updated_at.fixed_offset()),
                })
                .exec(conn)
                .await
                .map_err(|e| {
                    error!("Failed to create allergen: {}", e);
                    CoreError::InternalServerError
                })?;
            }
        }

        Ok(())
    }

    async fn ingredient_models(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<crate::entity::ingredients::Model>, CoreError> {
        IngredientEntity::find()
            .filter(IngredientColumn::ProductId.eq(product_id))
            .order_by_asc(IngredientColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch ingredients: {}", e);
                CoreError::InternalServerError
            })
    }
}

impl CatalogRepository for PostgresCatalogRepository {
    async fn find_product_by_upc(&self, upc_code: String) -> Result<Option<Product>, CoreError> {
        let product = ProductEntity::find()
            .filter(ProductColumn::UpcCode.eq(upc_code))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to find product by UPC: {}", e);
                CoreError::InternalServerError
            })?
            .map(Product::from);

        Ok(product)
    }

    async fn count_products(&self) -> Result<u64, CoreError> {
        ProductEntity::find().count(&self.db).await.map_err(|e| {
            error!("Failed to count products: {}", e);
            CoreError::InternalServerError
        })
    }

    async fn count_ingredients(&self, product_id: Uuid) -> Result<u64, CoreError> {
        IngredientEntity::find()
            .filter(IngredientColumn::ProductId.eq(product_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to count ingredients: {}", e);
                CoreError::InternalServerError
            })
    }

    async fn create_product_with_ingredients(
        &self,
        product: Product,
        ingredients: Vec<NewIngredient>,
    ) -> Result<Product, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to open transaction: {}", e);
            CoreError::InternalServerError
        })?;

        let created = ProductEntity::insert(ProductActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            upc_code: Set(product.upc_code),
            ingredient_image_path: Set(product.ingredient_image_path),
            created_at: Set(product.created_at.fixed_offset()),
            updated_at: Set(product.updated_at.fixed_offset()),
        })
        .exec_with_returning(&txn)
        .await
        .map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return CoreError::DuplicateProduct;
            }
            error!("Failed to create product: {}", e);
            CoreError::InternalServerError
        })?;

        Self::insert_ingredient_rows(&txn, created.id, ingredients).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Product::from(created))
    }

    async fn add_ingredients(
        &self,
        product_id: Uuid,
        ingredients: Vec<NewIngredient>,
    ) -> Result<(), CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to open transaction: {}", e);
            CoreError::InternalServerError
        })?;

        Self::insert_ingredient_rows(&txn, product_id, ingredients).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            CoreError::InternalServerError
        })
    }

    async fn fetch_ingredients(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<IngredientWithAllergens>, CoreError> {
        let ingredient_models = self.ingredient_models(product_id).await?;
        let ingredient_ids: Vec<Uuid> = ingredient_models.iter().map(|m| m.id).collect();

        let allergen_models = AllergenEntity::find()
            .filter(AllergenColumn::IngredientId.is_in(ingredient_ids))
            .order_by_asc(AllergenColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch allergens: {}", e);
                CoreError::InternalServerError
            })?;

        let result = ingredient_models
            .iter()
            .map(|model| IngredientWithAllergens {
                ingredient: Ingredient::from(model),
                allergens: allergen_models
                    .iter()
                    .filter(|allergen| allergen.ingredient_id == model.id)
                    .map(Allergen::from)
                    .collect(),
            })
            .collect();

        Ok(result)
    }

    async fn product_allergen_terms(&self, product_id: Uuid) -> Result<Vec<String>, CoreError> {
        let ingredient_ids: Vec<Uuid> = self
            .ingredient_models(product_id)
            .await?
            .iter()
            .map(|m| m.id)
            .collect();

        let names = AllergenEntity::find()
            .filter(AllergenColumn::IngredientId.is_in(ingredient_ids))
            .order_by_asc(AllergenColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch allergen terms: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(|model| model.name)
            .collect();

        Ok(names)
    }
}
