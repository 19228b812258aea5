use crate::domain::{
    catalog::value_objects::NewIngredient, classification::entities::IngredientReport,
    text::normalize_text,
};

/// Title of the placeholder ingredient that carries blanket trace warnings
/// when the classifier reports general allergens but no ingredients.
pub const GENERAL_ALLERGEN_TITLE: &str = "General Allergen Information";

/// Flattens a classifier report into persistable ingredient rows.
///
/// General allergens are attached to the first ingredient; if the report has
/// none, a placeholder ingredient is created to hold them.
pub fn report_to_ingredients(report: &IngredientReport) -> Vec<NewIngredient> {
    let mut rows: Vec<NewIngredient> = report
        .ingredients
        .iter()
        .filter(|analysis| !analysis.name.trim().is_empty())
        .map(|analysis| NewIngredient {
            title: normalize_text(&analysis.name),
            allergens: analysis
                .allergens
                .iter()
                .filter(|name| !name.trim().is_empty())
                .map(|name| name.trim().to_string())
                .collect(),
        })
        .collect();

    let general: Vec<String> = report
        .general_allergens
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.trim().to_string())
        .collect();

    if !general.is_empty() {
        if rows.is_empty() {
            rows.push(NewIngredient {
                title: GENERAL_ALLERGEN_TITLE.to_string(),
                allergens: Vec::new(),
            });
        }
        rows[0].allergens.extend(general);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::entities::IngredientAnalysis;

    fn report(
        ingredients: Vec<(&str, Vec<&str>)>,
        general: Vec<&str>,
    ) -> IngredientReport {
        IngredientReport {
            ingredients: ingredients
                .into_iter()
                .map(|(name, allergens)| IngredientAnalysis {
                    name: name.to_string(),
                    allergens: allergens.into_iter().map(String::from).collect(),
                })
                .collect(),
            general_allergens: general.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn maps_ingredients_and_allergens() {
        let rows = report_to_ingredients(&report(
            vec![("water", vec![]), ("whey powder", vec!["milk"])],
            vec![],
        ));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "water");
        assert!(rows[0].allergens.is_empty());
        assert_eq!(rows[1].allergens, vec!["milk"]);
    }

    #[test]
    fn general_allergens_attach_to_first_ingredient() {
        let rows = report_to_ingredients(&report(
            vec![("water", vec![]), ("sugar", vec![])],
            vec!["peanuts", "sesame"],
        ));

        assert_eq!(rows[0].allergens, vec!["peanuts", "sesame"]);
        assert!(rows[1].allergens.is_empty());
    }

    #[test]
    fn placeholder_created_when_only_general_allergens_present() {
        let rows = report_to_ingredients(&report(vec![], vec!["tree nuts"]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, GENERAL_ALLERGEN_TITLE);
        assert_eq!(rows[0].allergens, vec!["tree nuts"]);
    }

    #[test]
    fn blank_names_are_dropped() {
        let rows = report_to_ingredients(&report(
            vec![("  ", vec!["milk"]), ("salt", vec![" "])],
            vec![],
        ));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "salt");
        assert!(rows[0].allergens.is_empty());
    }
}
