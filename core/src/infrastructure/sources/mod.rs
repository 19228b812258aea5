pub mod edeka;
pub mod openfoodfacts;
pub mod rewe;
