//! Quote model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::util::unix_timestamp_ms;

/// Upper bound (exclusive) of the random jitter added to time-based ids.
const ID_JITTER_MS: i64 = 1000;

/// Identifier of a quote record.
///
/// Locally created ids are the creation time in Unix ms plus a small random
/// jitter; remote ids are taken as supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(i64);

impl QuoteId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Create a fresh id derived from `now_ms`
    #[must_use]
    pub fn generate(now_ms: i64) -> Self {
        let jitter = rand::rng().random_range(0..ID_JITTER_MS);
        Self(now_ms.saturating_add(jitter))
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for QuoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for QuoteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A quote in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Unique identifier within a store
    pub id: QuoteId,
    /// Quote body
    pub text: String,
    /// Free-form category label
    pub category: String,
    /// Merge tie-breaker timestamp, only ever compared
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

impl QuoteRecord {
    /// Create a new record stamped with the current time.
    ///
    /// Does not validate; callers at the input boundary check for empty fields.
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        let now = unix_timestamp_ms();
        Self {
            id: QuoteId::generate(now),
            text: text.into(),
            category: category.into(),
            updated_at: now,
        }
    }

    /// Build a record with explicit identity and timestamp (remote or imported data)
    #[must_use]
    pub fn with_id(
        id: impl Into<QuoteId>,
        text: impl Into<String>,
        category: impl Into<String>,
        updated_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: category.into(),
            updated_at,
        }
    }

    /// Whether the record belongs to `category` (exact match)
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category == category
    }
}

/// Built-in starter collection used when a store starts out empty and seeding
/// is enabled.
///
/// Seeds are local records: ids and timestamps come from the current time, so
/// they never share an id with the small integer ids a remote hands out.
#[must_use]
pub fn default_quotes() -> Vec<QuoteRecord> {
    seed_quotes_at(unix_timestamp_ms())
}

fn seed_quotes_at(now_ms: i64) -> Vec<QuoteRecord> {
    const SEED: [(&str, &str); 5] = [
        (
            "The only way to do great work is to love what you do.",
            "inspiration",
        ),
        (
            "Innovation distinguishes between a leader and a follower.",
            "business",
        ),
        (
            "Your time is limited, don't waste it living someone else's life.",
            "life",
        ),
        ("Stay hungry, stay foolish.", "inspiration"),
        (
            "The journey of a thousand miles begins with one step.",
            "life",
        ),
    ];

    // One jitter window per seed keeps the ids distinct.
    SEED.iter()
        .zip(0_i64..)
        .map(|((text, category), index)| {
            let id = QuoteId::generate(now_ms.saturating_add(index * ID_JITTER_MS));
            QuoteRecord::with_id(id, *text, *category, now_ms)
        })
        .collect()
}
