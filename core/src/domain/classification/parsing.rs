use tracing::warn;

use crate::domain::{
    classification::entities::IngredientReport, common::entities::app_errors::CoreError,
};

/// Parses a classifier completion into an [`IngredientReport`].
///
/// The completion may wrap the JSON payload in surrounding prose, so a direct
/// parse is attempted first and the first balanced `{...}` block second.
pub fn parse_report(content: &str) -> Result<IngredientReport, CoreError> {
    if let Ok(report) = serde_json::from_str::<IngredientReport>(content) {
        return Ok(report);
    }

    if let Some(block) = first_json_object(content)
        && let Ok(report) = serde_json::from_str::<IngredientReport>(block)
    {
        return Ok(report);
    }

    warn!(
        completion = %content.chars().take(200).collect::<String>(),
        "failed to parse ingredient report from classifier completion"
    );

    Err(CoreError::ClassificationMalformed(
        "no ingredient JSON object found in completion".to_string(),
    ))
}

/// Locates the first balanced top-level JSON object in `text`, skipping brace
/// characters inside string literals.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json_object() {
        let report = parse_report(
            r#"{"ingredients":[{"name":"sugar","allergens":[]},{"name":"milk","allergens":["milk"]}]}"#,
        )
        .unwrap();

        assert_eq!(report.ingredients.len(), 2);
        assert_eq!(report.ingredients[1].allergens, vec!["milk"]);
        assert!(report.general_allergens.is_empty());
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let content = r#"Sure! Here is the analysis you asked for:
{"ingredients":[{"name":"wheat flour","allergens":["wheat"]}],"general_allergens":["peanuts"]}
Let me know if you need anything else."#;

        let report = parse_report(content).unwrap();
        assert_eq!(report.ingredients[0].name, "wheat flour");
        assert_eq!(report.general_allergens, vec!["peanuts"]);
    }

    #[test]
    fn braces_inside_string_literals_do_not_break_extraction() {
        let content = r#"note: {"ingredients":[{"name":"od{d} syrup","allergens":[]}]} end"#;
        let report = parse_report(content).unwrap();
        assert_eq!(report.ingredients[0].name, "od{d} syrup");
    }

    #[test]
    fn missing_ingredients_field_is_malformed() {
        let err = parse_report(r#"{"dishes":[]}"#).unwrap_err();
        assert!(matches!(err, CoreError::ClassificationMalformed(_)));
    }

    #[test]
    fn plain_prose_is_malformed() {
        let err = parse_report("I could not read the label, sorry.").unwrap_err();
        assert!(matches!(err, CoreError::ClassificationMalformed(_)));
    }

    #[test]
    fn general_allergens_default_to_empty() {
        let report = parse_report(r#"{"ingredients":[]}"#).unwrap();
        assert!(report.general_allergens.is_empty());
    }
}
