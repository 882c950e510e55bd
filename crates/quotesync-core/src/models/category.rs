//! Category filter used by the random-quote display

use std::fmt;
use std::str::FromStr;

use crate::models::QuoteRecord;

/// Label that selects every category.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Build a filter from optional user input; `None`, blank and `"all"` select everything.
    #[must_use]
    pub fn from_option(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(label) if label.eq_ignore_ascii_case(ALL_CATEGORIES) => Self::All,
            Some(label) => Self::Only(label.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, quote: &QuoteRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => quote.in_category(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_option(Some(s)))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category) => f.write_str(category),
        }
    }
}
