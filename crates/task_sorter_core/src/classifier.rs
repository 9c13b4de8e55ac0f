//! Keyword-rule task classifier.
//!
//! # Responsibility
//! - Map free task text to exactly one category.
//!
//! # Invariants
//! - Pure and deterministic: no I/O, no dependency on stored tasks.
//! - Keyword hits are resolved by rule order (first match wins), never by
//!   hit count or keyword length.
//! - A category is always returned; the default closes the search.

use crate::model::category::{Category, CategoryRule, CATEGORY_RULES, DEFAULT_CATEGORY};

/// Classifies text with the built-in rule set.
///
/// Callers must reject blank text beforehand; blank text falls through to
/// `DEFAULT_CATEGORY`.
pub fn classify(text: &str) -> Category {
    classify_with(CATEGORY_RULES, DEFAULT_CATEGORY, text)
}

/// Classifies text with an explicit rule list and default.
///
/// 1. Lowercase the text.
/// 2. First rule with any keyword contained in the text wins.
/// 3. Else, first rule whose fallback words contain the first token wins.
/// 4. Else `default`.
pub fn classify_with(rules: &[CategoryRule], default: Category, text: &str) -> Category {
    let normalized = text.to_lowercase();

    if let Some(rule) = rules.iter().find(|rule| {
        rule.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
    }) {
        return rule.category;
    }

    let Some(first_token) = normalized.split_whitespace().next() else {
        return default;
    };

    rules
        .iter()
        .find(|rule| rule.fallback_words.iter().any(|word| *word == first_token))
        .map_or(default, |rule| rule.category)
}
