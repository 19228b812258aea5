pub mod user_allergy_repository;
