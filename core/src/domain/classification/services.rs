use crate::domain::{
    classification::{
        entities::{ImageMime, IngredientReport},
        parsing::parse_report,
        ports::ClassifierClient,
        prompts::{ANALYSIS_MAX_TOKENS, ingredient_image_prompt, ingredient_text_prompt},
    },
    common::{entities::app_errors::CoreError, services::Service},
};

impl<C, U, L, P, R, E> Service<C, U, L, P, R, E>
where
    L: ClassifierClient,
{
    /// Extracts a structured ingredient report from free-text ingredients.
    pub async fn analyze_ingredient_text(
        &self,
        ingredients_text: &str,
    ) -> Result<IngredientReport, CoreError> {
        let prompt = ingredient_text_prompt(ingredients_text);
        let completion = self
            .classifier_client
            .complete_text(prompt, ANALYSIS_MAX_TOKENS)
            .await?;

        parse_report(&completion)
    }

    /// Extracts a structured ingredient report from a label photograph.
    pub async fn analyze_ingredient_image(
        &self,
        image: Vec<u8>,
        mime: ImageMime,
    ) -> Result<IngredientReport, CoreError> {
        let completion = self
            .classifier_client
            .complete_with_image(ingredient_image_prompt(), image, mime, ANALYSIS_MAX_TOKENS)
            .await?;

        parse_report(&completion)
    }
}
