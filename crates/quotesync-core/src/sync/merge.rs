//! Last-writer-wins merge of a remote snapshot into the local store

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::models::{QuoteId, QuoteRecord};
use crate::store::QuoteStore;

/// A local record overwritten by a newer remote one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConflict {
    pub quote_id: QuoteId,
    /// Local timestamp that lost
    pub local_updated_at: i64,
    /// Remote timestamp that won
    pub incoming_updated_at: i64,
}

/// Outcome of one merge pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileResult {
    /// Number of local records overwritten by remote ones
    pub conflicts: usize,
    /// Number of remote records appended as new
    pub added: usize,
    pub resolved: Vec<ResolvedConflict>,
    /// Category labels present after the pass
    pub categories: BTreeSet<String>,
}

impl ReconcileResult {
    pub const fn has_changes(&self) -> bool {
        self.conflicts > 0 || self.added > 0
    }
}

/// Merge `snapshot` into `store`.
///
/// Per remote record, by id:
/// - unknown locally: appended (not a conflict)
/// - local `updated_at` strictly older: replaced whole, counted as a conflict
/// - otherwise: local record kept (local wins ties)
///
/// When the snapshot repeats an id, only its last occurrence is applied.
/// The store is persisted once at the end of a pass that changed anything.
pub fn reconcile(snapshot: Vec<QuoteRecord>, store: &mut QuoteStore) -> ReconcileResult {
    let last_occurrence = snapshot
        .iter()
        .enumerate()
        .map(|(position, quote)| (quote.id, position))
        .collect::<HashMap<_, _>>();

    let mut local_index = HashMap::with_capacity(store.len());
    for (position, quote) in store.quotes().iter().enumerate() {
        local_index.entry(quote.id).or_insert(position);
    }

    let mut result = ReconcileResult::default();

    for (position, incoming) in snapshot.into_iter().enumerate() {
        if last_occurrence.get(&incoming.id) != Some(&position) {
            continue;
        }

        match local_index.get(&incoming.id).copied() {
            None => {
                local_index.insert(incoming.id, store.len());
                store.push(incoming);
                result.added += 1;
            }
            Some(index) => {
                let local_updated_at = store.quotes()[index].updated_at;
                if local_updated_at < incoming.updated_at {
                    result.resolved.push(ResolvedConflict {
                        quote_id: incoming.id,
                        local_updated_at,
                        incoming_updated_at: incoming.updated_at,
                    });
                    store.replace_at(index, incoming);
                }
            }
        }
    }

    result.conflicts = result.resolved.len();
    if result.has_changes() {
        store.persist();
    }
    result.categories = store.categories();
    result
}
