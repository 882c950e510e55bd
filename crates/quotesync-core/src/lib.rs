//! quotesync-core - Core library for quotesync
//!
//! This crate contains the quote models, the local store with its persistence
//! slots, and the reconciliation engine that merges remote snapshots into the
//! store. Front ends (the CLI today) plug in through the [`app::QuoteView`]
//! boundary.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod store;
pub mod sync;
pub mod transfer;
pub mod util;

pub use error::{Error, Result};
pub use models::{CategoryFilter, QuoteId, QuoteRecord};
pub use store::QuoteStore;
pub use sync::{reconcile, ReconcileResult, ResolvedConflict};
