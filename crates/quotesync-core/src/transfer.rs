//! Quote import/export helpers.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{QuoteId, QuoteRecord};
use crate::store::validate_quote_fields;

/// One validated element of an import payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedQuote {
    pub id: Option<QuoteId>,
    pub text: String,
    pub category: String,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawImportItem {
    #[serde(default)]
    id: Option<QuoteId>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "updatedAt")]
    updated_at: Option<i64>,
}

/// Render quotes as a pretty-printed JSON array.
pub fn render_json_export(quotes: &[QuoteRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(quotes)
}

/// Parse and validate an import payload.
///
/// The payload must be a JSON array whose every element has non-empty `text`
/// and `category`. A single bad element rejects the whole payload.
pub fn parse_import(payload: &str) -> Result<Vec<ImportedQuote>> {
    let items: Vec<RawImportItem> = serde_json::from_str(payload)?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let (text, category) =
                validate_quote_fields(item.text.as_deref(), item.category.as_deref()).map_err(
                    |error| Error::Validation(format!("element {index}: {error}")),
                )?;
            Ok(ImportedQuote {
                id: item.id,
                text,
                category,
                updated_at: item.updated_at,
            })
        })
        .collect()
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(timestamp_ms: i64) -> String {
    format!("quotes-export-{timestamp_ms}.json")
}
