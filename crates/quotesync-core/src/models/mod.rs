//! Data models for quotesync

mod category;
mod quote;

pub use category::CategoryFilter;
pub use quote::{default_quotes, QuoteId, QuoteRecord};
