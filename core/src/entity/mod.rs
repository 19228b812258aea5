pub mod allergens;
pub mod ingredients;
pub mod products;
pub mod user_allergies;
