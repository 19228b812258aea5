use std::sync::LazyLock;

use regex::Regex;

use crate::domain::common::entities::app_errors::CoreError;

/// Maximum length of a stored display string; longer input is truncated with
/// an ellipsis marker.
pub const MAX_DISPLAY_LEN: usize = 255;
const TRUNCATED_LEN: usize = 252;

/// German food vocabulary used to decide whether a free-text ingredient list
/// is German before attempting German-specific classification.
pub const GERMAN_FOOD_WORDS: &[&str] = &[
    "zucker",
    "wasser",
    "salz",
    "öl",
    "mehl",
    "butter",
    "milch",
    "eier",
    "weizenmehl",
    "vollmilch",
    "palmöl",
    "sonnenblumenöl",
    "glukose",
    "fruktose",
    "maltodextrin",
    "lecithin",
    "vanillin",
    "aroma",
    "zitronensäure",
    "ascorbinsäure",
    "natriumchlorid",
    "kalzium",
    "vitamin",
    "konservierungsstoff",
    "farbstoff",
    "emulgator",
    "stabilisator",
    "antioxidationsmittel",
    "säureregulator",
];

/// Two distinct vocabulary hits are enough to call the text German.
pub const GERMAN_WORD_THRESHOLD: usize = 2;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Trims, collapses whitespace runs, strips control characters, and truncates
/// to [`MAX_DISPLAY_LEN`] characters (ending in `...` when truncated).
pub fn normalize_text(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_control()).collect();
    let collapsed = WHITESPACE_RUN.replace_all(stripped.trim(), " ");

    if collapsed.chars().count() > MAX_DISPLAY_LEN {
        let mut truncated: String = collapsed.chars().take(TRUNCATED_LEN).collect();
        truncated.push_str("...");
        truncated
    } else {
        collapsed.into_owned()
    }
}

/// Counts distinct case-insensitive vocabulary hits in `text` and returns
/// true iff the count reaches `threshold`.
pub fn contains_vocabulary(text: &str, vocabulary: &[&str], threshold: usize) -> bool {
    let haystack = text.to_lowercase();
    let hits = vocabulary
        .iter()
        .filter(|word| haystack.contains(&word.to_lowercase()))
        .count();

    hits >= threshold
}

pub fn looks_like_german(text: &str) -> bool {
    contains_vocabulary(text, GERMAN_FOOD_WORDS, GERMAN_WORD_THRESHOLD)
}

/// Comparison key for conflict matching and duplicate-allergy detection.
pub fn normalize_allergen_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validates and normalizes a UPC code: separators removed, 8-14 ASCII
/// digits required.
pub fn normalize_upc(raw: &str) -> Result<String, CoreError> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if digits.len() < 8 || digits.len() > 14 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidCandidate(format!(
            "invalid UPC code: {raw:?}"
        )));
    }

    Ok(digits)
}
