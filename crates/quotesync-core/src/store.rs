//! Local quote store.
//!
//! [`QuoteStore`] owns the authoritative in-memory collection and mirrors it
//! to an optional [`QuoteSlot`]. Persistence is best-effort for mutations: a
//! failed write is logged and the store keeps working in memory.

use std::collections::BTreeSet;

use rand::seq::IndexedRandom;

use crate::error::{Error, Result};
use crate::models::{default_quotes, CategoryFilter, QuoteId, QuoteRecord};
use crate::persistence::QuoteSlot;
use crate::transfer::{parse_import, render_json_export};

/// Ordered quote collection with optional durable mirror
pub struct QuoteStore {
    quotes: Vec<QuoteRecord>,
    slot: Option<Box<dyn QuoteSlot>>,
    seed_defaults: bool,
}

impl QuoteStore {
    /// Empty store without persistence
    pub const fn in_memory() -> Self {
        Self {
            quotes: Vec::new(),
            slot: None,
            seed_defaults: false,
        }
    }

    /// Store without persistence holding `quotes`
    pub const fn with_quotes(quotes: Vec<QuoteRecord>) -> Self {
        Self {
            quotes,
            slot: None,
            seed_defaults: false,
        }
    }

    /// Open a store backed by `slot` and load its persisted contents.
    ///
    /// With `seed_defaults`, an absent or unreadable slot yields the built-in
    /// starter quotes instead of an empty collection.
    pub fn open(slot: impl QuoteSlot + 'static, seed_defaults: bool) -> Self {
        let mut store = Self {
            quotes: Vec::new(),
            slot: Some(Box::new(slot)),
            seed_defaults,
        };
        store.load();
        store
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// Absent or malformed persisted data falls back to the initial
    /// collection; this never fails.
    pub fn load(&mut self) {
        let seed_defaults = self.seed_defaults;
        let Some(slot) = self.slot.as_deref() else {
            self.quotes = initial_quotes(seed_defaults);
            return;
        };

        let loaded = match slot.read() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<QuoteRecord>>(&raw) {
                Ok(quotes) => {
                    tracing::debug!("Loaded {} quotes from {}", quotes.len(), slot.describe());
                    quotes
                }
                Err(error) => {
                    tracing::warn!(
                        "Persisted quotes at {} are malformed ({}); starting from initial set",
                        slot.describe(),
                        Error::Parse(error)
                    );
                    initial_quotes(seed_defaults)
                }
            },
            Ok(None) => {
                tracing::debug!("No persisted quotes at {}", slot.describe());
                initial_quotes(seed_defaults)
            }
            Err(error) => {
                tracing::warn!(
                    "Failed to read persisted quotes at {}: {}",
                    slot.describe(),
                    error
                );
                initial_quotes(seed_defaults)
            }
        };
        self.quotes = loaded;
    }

    /// Serialize the full collection into the slot, replacing the previous value
    pub fn save(&self) -> Result<()> {
        let Some(slot) = self.slot.as_deref() else {
            return Ok(());
        };

        let serialized = serde_json::to_string(&self.quotes)
            .map_err(|error| Error::Persistence(format!("failed to serialize quotes: {error}")))?;
        slot.write(&serialized)
    }

    /// Best-effort [`save`](Self::save); returns whether the write succeeded
    pub fn persist(&self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!("Failed to persist quotes, continuing in memory: {error}");
                false
            }
        }
    }

    /// Validate and append a new quote
    pub fn add(&mut self, text: &str, category: &str) -> Result<QuoteRecord> {
        let (text, category) = validate_quote_fields(Some(text), Some(category))?;
        let quote = QuoteRecord::new(text, category);
        self.quotes.push(quote.clone());
        self.persist();
        Ok(quote)
    }

    /// Append every element of a JSON array, or nothing if any element is invalid
    pub fn import(&mut self, payload: &str) -> Result<usize> {
        let imported = parse_import(payload)?;
        let count = imported.len();

        for item in imported {
            let quote = match (item.id, item.updated_at) {
                (Some(id), Some(updated_at)) if self.position(id).is_none() => {
                    QuoteRecord::with_id(id, item.text, item.category, updated_at)
                }
                _ => QuoteRecord::new(item.text, item.category),
            };
            self.quotes.push(quote);
        }

        if count > 0 {
            self.persist();
        }
        tracing::debug!("Imported {count} quotes");
        Ok(count)
    }

    /// Pretty-printed JSON array of the whole collection
    pub fn export_json(&self) -> Result<String> {
        Ok(render_json_export(&self.quotes)?)
    }

    pub fn find_by_id(&self, id: QuoteId) -> Option<&QuoteRecord> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    pub fn position(&self, id: QuoteId) -> Option<usize> {
        self.quotes.iter().position(|quote| quote.id == id)
    }

    /// Distinct category labels currently present
    pub fn categories(&self) -> BTreeSet<String> {
        self.quotes
            .iter()
            .map(|quote| quote.category.clone())
            .collect()
    }

    /// Quotes matching `filter`, in store order
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&QuoteRecord> {
        self.quotes
            .iter()
            .filter(|quote| filter.matches(quote))
            .collect()
    }

    /// Uniformly random quote among those matching `filter`
    pub fn random_quote(&self, filter: &CategoryFilter) -> Option<&QuoteRecord> {
        let matching = self.filtered(filter);
        matching.choose(&mut rand::rng()).copied()
    }

    /// Empty the collection and erase the persisted value
    pub fn clear(&mut self) -> Result<()> {
        self.quotes.clear();
        match self.slot.as_deref() {
            Some(slot) => slot.erase(),
            None => Ok(()),
        }
    }

    pub fn quotes(&self) -> &[QuoteRecord] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub const fn is_persistent(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) fn push(&mut self, quote: QuoteRecord) {
        self.quotes.push(quote);
    }

    pub(crate) fn replace_at(&mut self, index: usize, quote: QuoteRecord) {
        self.quotes[index] = quote;
    }
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("QuoteStore")
            .field("quotes", &self.quotes.len())
            .field("slot", &self.slot.as_deref().map(|slot| slot.describe()))
            .field("seed_defaults", &self.seed_defaults)
            .finish()
    }
}

/// Trim both fields and reject missing or empty values
pub fn validate_quote_fields(
    text: Option<&str>,
    category: Option<&str>,
) -> Result<(String, String)> {
    let text = text.map(str::trim).unwrap_or_default();
    let category = category.map(str::trim).unwrap_or_default();

    match (text.is_empty(), category.is_empty()) {
        (false, false) => Ok((text.to_string(), category.to_string())),
        (true, true) => Err(Error::Validation(
            "quote text and category are required".to_string(),
        )),
        (true, false) => Err(Error::Validation("quote text is required".to_string())),
        (false, true) => Err(Error::Validation("quote category is required".to_string())),
    }
}

fn initial_quotes(seed_defaults: bool) -> Vec<QuoteRecord> {
    if seed_defaults {
        default_quotes()
    } else {
        Vec::new()
    }
}
