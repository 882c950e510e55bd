//! Front-end boundary.
//!
//! A front end implements [`QuoteView`] and forwards user actions to
//! [`QuoteApp`]; the app mutates the store, runs syncs and calls back into
//! the view with what to show.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::{CategoryFilter, QuoteRecord};
use crate::sync::{SnapshotSource, SyncOutcome, SyncService};

/// Rendering callbacks implemented by a front end
pub trait QuoteView {
    /// Show a quote, or an empty-state message when `None`
    fn render(&self, quote: Option<&QuoteRecord>);

    fn render_categories(&self, categories: &BTreeSet<String>);

    /// Tell the user that `count` local quotes were replaced by remote ones
    fn render_conflict_notice(&self, count: usize);

    /// User-visible notice for degraded or rejected operations
    fn render_notice(&self, message: &str);
}

pub struct QuoteApp<S, V> {
    sync: SyncService<S>,
    view: V,
    filter: CategoryFilter,
    push_on_add: bool,
}

impl<S: SnapshotSource + 'static, V: QuoteView> QuoteApp<S, V> {
    pub fn new(sync: SyncService<S>, view: V) -> Self {
        Self {
            sync,
            view,
            filter: CategoryFilter::All,
            push_on_add: false,
        }
    }

    #[must_use]
    pub const fn with_push_on_add(mut self, push_on_add: bool) -> Self {
        self.push_on_add = push_on_add;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn sync_service(&self) -> &SyncService<S> {
        &self.sync
    }

    /// Initial render: category list followed by a random quote
    pub async fn start(&self) -> Option<QuoteRecord> {
        let categories = self.sync.store().lock().await.categories();
        self.view.render_categories(&categories);
        self.show_random().await
    }

    /// Render a random quote matching the current filter
    pub async fn show_random(&self) -> Option<QuoteRecord> {
        let quote = self
            .sync
            .store()
            .lock()
            .await
            .random_quote(&self.filter)
            .cloned();
        self.view.render(quote.as_ref());
        quote
    }

    pub async fn on_add_requested(&self, text: &str, category: &str) -> Result<QuoteRecord> {
        let added = {
            let mut store = self.sync.store().lock().await;
            store
                .add(text, category)
                .map(|quote| (quote, store.categories()))
        };
        let (quote, categories) = match added {
            Ok(added) => added,
            Err(error) => {
                self.view.render_notice(&error.to_string());
                return Err(error);
            }
        };

        self.view.render_categories(&categories);
        self.view.render(Some(&quote));

        if self.push_on_add && !self.sync.push_quote(&quote).await {
            self.view
                .render_notice("Quote saved locally but could not be sent to the server");
        }
        Ok(quote)
    }

    pub async fn on_category_changed(&mut self, category: &str) -> Option<QuoteRecord> {
        self.filter = CategoryFilter::from_option(Some(category));
        self.show_random().await
    }

    pub async fn on_refresh_requested(&self) -> SyncOutcome {
        self.trigger_sync().await
    }

    /// Run a sync pass and render its outcome
    pub async fn trigger_sync(&self) -> SyncOutcome {
        let outcome = self.sync.trigger_sync().await;
        self.render_outcome(&outcome);
        outcome
    }

    /// Render a sync outcome, e.g. one produced by the interval scheduler
    pub fn render_outcome(&self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Completed(result) => {
                self.view.render_categories(&result.categories);
                if result.conflicts > 0 {
                    self.view.render_conflict_notice(result.conflicts);
                }
            }
            SyncOutcome::Skipped => self.view.render_notice("Sync already in progress"),
        }
    }
}
