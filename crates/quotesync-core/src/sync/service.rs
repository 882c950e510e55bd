//! Single-flight sync service and interval scheduler.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use crate::models::QuoteRecord;
use crate::store::QuoteStore;
use crate::sync::{reconcile, FetchError, ReconcileResult, SnapshotSource};

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Store handle shared between the sync service and front ends
pub type SharedStore = Arc<Mutex<QuoteStore>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A merge pass ran; a failed fetch shows up as an empty pass
    Completed(ReconcileResult),
    /// Another pass was already running, so this trigger was dropped
    Skipped,
}

/// Runs sync passes against a shared store.
///
/// At most one pass is in flight at a time; overlapping triggers are
/// dropped. The store lock is only held for the merge itself, never across
/// the remote fetch.
pub struct SyncService<S> {
    store: SharedStore,
    source: Arc<S>,
    fetch_timeout: Duration,
    in_flight: Arc<AtomicBool>,
}

impl<S> Clone for SyncService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            source: Arc::clone(&self.source),
            fetch_timeout: self.fetch_timeout,
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<S: SnapshotSource + 'static> SyncService<S> {
    pub fn new(store: SharedStore, source: S) -> Self {
        Self {
            store,
            source: Arc::new(source),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub const fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one sync pass unless another is already in flight
    pub async fn trigger_sync(&self) -> SyncOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Sync already in progress; dropping trigger");
            return SyncOutcome::Skipped;
        };

        let snapshot = self.fetch_snapshot().await;
        let result = {
            let mut store = self.store.lock().await;
            reconcile(snapshot, &mut store)
        };

        if result.conflicts > 0 {
            tracing::info!(
                "Sync completed: {} added, {} conflicts resolved in favour of remote",
                result.added,
                result.conflicts
            );
        } else {
            tracing::debug!("Sync completed: {} added, no conflicts", result.added);
        }

        SyncOutcome::Completed(result)
    }

    /// Fetch the remote snapshot, degrading any failure to an empty one
    pub async fn fetch_snapshot(&self) -> Vec<QuoteRecord> {
        let error = match tokio::time::timeout(self.fetch_timeout, self.source.fetch_snapshot())
            .await
        {
            Ok(Ok(snapshot)) => return snapshot,
            Ok(Err(error)) => error,
            Err(_) => FetchError::Timeout(self.fetch_timeout),
        };

        tracing::warn!("Remote snapshot unavailable, treating as empty: {error}");
        Vec::new()
    }

    /// Best-effort upload of a locally created quote
    pub async fn push_quote(&self, quote: &QuoteRecord) -> bool {
        match tokio::time::timeout(self.fetch_timeout, self.source.push_quote(quote)).await {
            Ok(Ok(())) => true,
            Ok(Err(error)) => {
                tracing::warn!("Failed to push quote {}: {error}", quote.id);
                false
            }
            Err(_) => {
                tracing::warn!(
                    "Failed to push quote {}: {}",
                    quote.id,
                    FetchError::Timeout(self.fetch_timeout)
                );
                false
            }
        }
    }

    /// Trigger a sync every `period` until `shutdown` resolves.
    ///
    /// The first pass runs immediately. Ticks missed while a pass is running
    /// are skipped rather than bunched up.
    pub async fn run_every<F, Fut>(&self, period: Duration, shutdown: Fut, mut on_pass: F)
    where
        F: FnMut(SyncOutcome),
        Fut: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => on_pass(self.trigger_sync().await),
            }
        }

        tracing::debug!("Sync scheduler stopped");
    }

    /// Spawn [`run_every`](Self::run_every) on the tokio runtime
    pub fn spawn_every<Fut>(&self, period: Duration, shutdown: Fut) -> tokio::task::JoinHandle<()>
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let service = self.clone();
        tokio::spawn(async move {
            service.run_every(period, shutdown, |_| {}).await;
        })
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
