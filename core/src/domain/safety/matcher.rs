use crate::domain::{safety::value_objects::SafetyVerdict, text::normalize_allergen_term};

/// Two allergen terms conflict when either normalized form contains the
/// other. "nuts" matches "tree nuts", and "tree nuts" matches "nuts".
pub fn terms_conflict(a: &str, b: &str) -> bool {
    let a = normalize_allergen_term(a);
    let b = normalize_allergen_term(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.contains(&b) || b.contains(&a)
}

/// Matches the user's allergy terms against a product's allergen list.
///
/// The verdict's conflict list preserves the user's original spelling; the
/// product allergen list is normalized and de-duplicated in first-seen order.
pub fn check_safety(user_terms: &[String], product_allergens: &[String]) -> SafetyVerdict {
    let mut normalized_allergens: Vec<String> = Vec::new();
    for allergen in product_allergens {
        let normalized = normalize_allergen_term(allergen);
        if !normalized.is_empty() && !normalized_allergens.contains(&normalized) {
            normalized_allergens.push(normalized);
        }
    }

    let conflicts: Vec<String> = user_terms
        .iter()
        .filter(|term| {
            normalized_allergens
                .iter()
                .any(|allergen| terms_conflict(term, allergen))
        })
        .cloned()
        .collect();

    SafetyVerdict {
        is_safe: conflicts.is_empty(),
        conflicts,
        product_allergens: normalized_allergens,
    }
}
