//! Remote reconciliation.
//!
//! A sync pass fetches a snapshot from a [`SnapshotSource`] and merges it
//! into the local [`QuoteStore`](crate::QuoteStore) with a last-writer-wins
//! rule keyed by quote id. Passes are independent: nothing is retained
//! between them.

mod merge;
mod service;
mod source;

pub use merge::{reconcile, ReconcileResult, ResolvedConflict};
pub use service::{SharedStore, SyncOutcome, SyncService};
pub use source::{parse_snapshot, FetchError, HttpQuoteSource, SnapshotSource};
