//! Category set and static classification rules.
//!
//! # Responsibility
//! - Define the fixed category set every task belongs to.
//! - Own keyword/fallback/empty-state rule data exposed read-only to UI.
//!
//! # Invariants
//! - `CATEGORY_RULES` order is the classification priority order.
//! - Every `Category` variant has exactly one rule entry.
//! - `DEFAULT_CATEGORY` is always a member of the set.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed category label assigned to every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Chores, bills and upkeep around the home.
    House,
    /// Cooking, groceries and meal work.
    Kitchen,
    /// Learning and career tasks.
    Study,
}

/// Persisted string value for the house category.
pub const CATEGORY_HOUSE: &str = "house";
/// Persisted string value for the kitchen category.
pub const CATEGORY_KITCHEN: &str = "kitchen";
/// Persisted string value for the study category.
pub const CATEGORY_STUDY: &str = "study";

/// Category returned when neither keywords nor fallback words match.
pub const DEFAULT_CATEGORY: Category = Category::House;

impl Category {
    /// Stable string id used in persisted records and UI labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::House => CATEGORY_HOUSE,
            Self::Kitchen => CATEGORY_KITCHEN,
            Self::Study => CATEGORY_STUDY,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_category(value)
    }
}

/// Parses one category from its persisted string id.
///
/// Matching is exact: surrounding whitespace is ignored, case is not.
pub fn parse_category(value: &str) -> Result<Category, CategoryParseError> {
    match value.trim() {
        CATEGORY_HOUSE => Ok(Category::House),
        CATEGORY_KITCHEN => Ok(Category::Kitchen),
        CATEGORY_STUDY => Ok(Category::Study),
        other => Err(CategoryParseError(other.to_string())),
    }
}

/// Category value outside the configured set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl Display for CategoryParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown category: `{}`", self.0)
    }
}

impl Error for CategoryParseError {}

/// Static rule data for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    /// Lowercase substrings; any hit selects this category.
    pub keywords: &'static [&'static str],
    /// Lowercase words compared against the first token only.
    pub fallback_words: &'static [&'static str],
    /// Message the renderer shows when the category has no tasks.
    pub empty_message: &'static str,
}

const HOUSE_RULE: CategoryRule = CategoryRule {
    category: Category::House,
    keywords: &[
        "clean",
        "vacuum",
        "laundry",
        "fold",
        "organize",
        "bill",
        "rent",
        "utilities",
        "trash",
        "garden",
        "plant",
        "repairs",
        "declutter",
        "sweep",
        "mop",
        "paint",
        "fix",
        "call landlord",
        "schedule maintenance",
    ],
    fallback_words: &[],
    empty_message: "House looks empty. Add something cozy to tackle!",
};

const KITCHEN_RULE: CategoryRule = CategoryRule {
    category: Category::Kitchen,
    keywords: &[
        "cook",
        "meal",
        "recipe",
        "bake",
        "dinner",
        "lunch",
        "breakfast",
        "grocery",
        "shop",
        "produce",
        "snack",
        "dishes",
        "dishwasher",
        "fridge",
        "pantry",
        "meal prep",
        "wash vegetables",
        "marinate",
        "preheat",
    ],
    fallback_words: &["cook", "kitchen", "recipe"],
    empty_message: "Kitchen is sparkling clean - no tasks here yet.",
};

const STUDY_RULE: CategoryRule = CategoryRule {
    category: Category::Study,
    keywords: &[
        "study",
        "class",
        "course",
        "assignment",
        "homework",
        "read",
        "review",
        "exam",
        "quiz",
        "resume",
        "cover letter",
        "portfolio",
        "network",
        "interview",
        "job",
        "apply",
        "application",
        "linkedin",
        "practice",
        "research",
    ],
    fallback_words: &["study", "course", "job", "apply"],
    empty_message: "Line up those ambitions - nothing scheduled yet.",
};

/// Category rules in classification priority order.
pub const CATEGORY_RULES: &[CategoryRule] = &[HOUSE_RULE, KITCHEN_RULE, STUDY_RULE];

/// Returns all category rules, highest priority first.
pub fn category_rules() -> &'static [CategoryRule] {
    CATEGORY_RULES
}

/// Returns the configured categories in priority order.
pub fn categories() -> impl Iterator<Item = Category> {
    CATEGORY_RULES.iter().map(|rule| rule.category)
}

/// Returns the rule for one category.
pub fn rule_for(category: Category) -> &'static CategoryRule {
    match category {
        Category::House => &HOUSE_RULE,
        Category::Kitchen => &KITCHEN_RULE,
        Category::Study => &STUDY_RULE,
    }
}
