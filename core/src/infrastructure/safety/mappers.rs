use crate::domain::safety::entities::UserAllergy;
use crate::entity::user_allergies::Model as UserAllergyModel;

impl From<UserAllergyModel> for UserAllergy {
    fn from(model: UserAllergyModel) -> Self {
        UserAllergy {
            id: model.id,
            user_id: model.user_id,
            allergy_text: model.allergy_text,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<&UserAllergyModel> for UserAllergy {
    fn from(model: &UserAllergyModel) -> Self {
        UserAllergy {
            id: model.id,
            user_id: model.user_id,
            allergy_text: model.allergy_text.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}
