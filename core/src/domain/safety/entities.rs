use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// One allergy term a user has recorded, stored exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAllergy {
    pub id: Uuid,
    pub user_id: Uuid,
    pub allergy_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAllergy {
    pub fn new(user_id: Uuid, allergy_text: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            allergy_text,
            created_at: now,
            updated_at: now,
        }
    }
}
