use serde::{Deserialize, Serialize};

/// One extracted ingredient with the allergens it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAnalysis {
    pub name: String,
    #[serde(default)]
    pub allergens: Vec<String>,
}

/// Structured classifier output: per-ingredient allergens plus blanket
/// "may contain traces of" disclosures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientReport {
    pub ingredients: Vec<IngredientAnalysis>,
    #[serde(default)]
    pub general_allergens: Vec<String>,
}

/// Image payload types the classifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }
}
