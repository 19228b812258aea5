use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        safety::{entities::UserAllergy, ports::UserAllergyRepository},
    },
    entity::user_allergies::{
        ActiveModel as UserAllergyActiveModel, Column as UserAllergyColumn,
        Entity as UserAllergyEntity,
    },
};

#[derive(Debug, Clone)]
pub struct PostgresUserAllergyRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserAllergyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UserAllergyRepository for PostgresUserAllergyRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<UserAllergy>, CoreError> {
        let allergies = UserAllergyEntity::find()
            .filter(UserAllergyColumn::UserId.eq(user_id))
            .order_by_asc(UserAllergyColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list user allergies: {}", e);
                CoreError::InternalServerError
            })?
            .iter()
            .map(UserAllergy::from)
            .collect();

        Ok(allergies)
    }

    async fn create(&self, allergy: UserAllergy) -> Result<UserAllergy, CoreError> {
        let created = UserAllergyEntity::insert(UserAllergyActiveModel {
            id: Set(allergy.id),
            user_id: Set(allergy.user_id),
            allergy_text: Set(allergy.allergy_text),
            created_at: Set(allergy.created_at.fixed_offset()),
            updated_at: Set(allergy.updated_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(UserAllergy::from)
        .map_err(|e| {
            error!("Failed to create user allergy: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        allergy_text: String,
    ) -> Result<UserAllergy, CoreError> {
        let existing = UserAllergyEntity::find()
            .filter(UserAllergyColumn::Id.eq(id))
            .filter(UserAllergyColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load user allergy: {}", e);
                CoreError::InternalServerError
            })?
            .ok_or(CoreError::NotFound)?;

        let mut active: UserAllergyActiveModel = existing.into();
        active.allergy_text = Set(allergy_text);
        active.updated_at = Set(Utc::now().fixed_offset());

        let updated = active
            .update(&self.db)
            .await
            .map(UserAllergy::from)
            .map_err(|e| {
                error!("Failed to update user allergy: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        let result = UserAllergyEntity::delete_many()
            .filter(UserAllergyColumn::Id.eq(id))
            .filter(UserAllergyColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete user allergy: {}", e);
                CoreError::InternalServerError
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        Ok(())
    }
}
