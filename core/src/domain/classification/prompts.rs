/// Token budget for ingredient analyses.
pub const ANALYSIS_MAX_TOKENS: u32 = 1500;

const RESPONSE_CONTRACT: &str = r#"Please respond with a JSON object in exactly this format:
{
  "ingredients": [
    {
      "name": "ingredient name in English",
      "allergens": ["allergen1 in English", "allergen2 in English"]
    }
  ],
  "general_allergens": ["allergen disclosed via a blanket trace warning"]
}

Focus on common allergens and use these English terms: peanuts, tree nuts, milk, eggs, wheat, soy, fish, shellfish, sesame, corn, sulfites.

Be thorough but conservative - only list allergens that are clearly present or likely based on the ingredient name. If an ingredient doesn't contain obvious allergens, use an empty array. Use "general_allergens" only for blanket warnings such as "may contain traces of ...", or leave it empty.

Return ONLY the JSON object, no additional text or explanation."#;

/// Prompt for a German free-text ingredient list. Output is requested in
/// English regardless of the source language.
pub fn ingredient_text_prompt(ingredients_text: &str) -> String {
    format!(
        "Analyze this German ingredient list and extract all ingredients with their potential allergens.\n\n\
         IMPORTANT: Even though the input is in German, please translate all ingredient names and allergen names to English for consistency.\n\n\
         Ingredient list: \"{ingredients_text}\"\n\n\
         Always translate ingredient names to their English equivalents (e.g., \"Zucker\" -> \"sugar\", \"Milch\" -> \"milk\", \"Weizen\" -> \"wheat\", \"Eier\" -> \"eggs\").\n\n\
         {RESPONSE_CONTRACT}"
    )
}

/// Prompt for an ingredient-label photograph.
pub fn ingredient_image_prompt() -> String {
    format!(
        "Analyze this ingredient list image and extract all ingredients with their potential allergens.\n\n\
         IMPORTANT: Regardless of the language used in the image, please translate all ingredient names and allergen names to English.\n\n\
         Always translate ingredient names to their English equivalents (e.g., \"Zucker\" -> \"sugar\", \"Milch\" -> \"milk\", \"Weizen\" -> \"wheat\").\n\n\
         {RESPONSE_CONTRACT}"
    )
}
