//! The filter/pagination controller and its URL synchronization seam.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use aci_core::filters::{ArticleFilters, DateRange, SortBy};

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};

/// Collaborator owning the address bar.
///
/// Implementations replace the current URL's query string in place rather
/// than pushing a history entry, so rapid filter changes do not spam the
/// back button.
pub trait UrlSync {
    fn replace_query(&self, query: &str);
}

/// Single source of truth for one list view's query parameters.
///
/// Every mutation re-serializes to the URL and resets the page to 1 unless
/// the mutation was itself a page change. The controller is owned by the
/// page that created it; independent list views never share one.
pub struct FilterController<S: UrlSync> {
    filters: ArticleFilters,
    sync: S,
}

impl<S: UrlSync> FilterController<S> {
    /// Initialize from the URL on mount. Does not rewrite the URL: the
    /// parsed state is already what the address bar shows.
    pub fn from_url(sync: S, query: &str) -> Self {
        Self {
            filters: ArticleFilters::parse(query),
            sync,
        }
    }

    /// Current filter state.
    pub fn filters(&self) -> &ArticleFilters {
        &self.filters
    }

    /// Cache key for the data-fetch collaborator: the full filter+page
    /// tuple. The query cache de-duplicates and supersedes in-flight
    /// requests on this key, so a slow stale fetch cannot overwrite a
    /// newer one.
    pub fn query_key(&self) -> String {
        self.filters.to_query()
    }

    /// True when any filter dimension is set.
    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters()
    }

    /// Replace the severity selection. An empty selection clears the
    /// dimension.
    pub fn set_severity(&mut self, values: Vec<String>) {
        self.apply(|f| f.severity = non_empty(values));
    }

    /// Replace the category selection.
    pub fn set_category(&mut self, values: Vec<String>) {
        self.apply(|f| f.category = non_empty(values));
    }

    /// Replace the source selection.
    pub fn set_source(&mut self, values: Vec<String>) {
        self.apply(|f| f.source = non_empty(values));
    }

    /// Set or clear the publication-date window.
    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.apply(|f| f.date_range = range);
    }

    /// Apply a search term. An empty term clears the search. Callers with
    /// keystroke-level input should go through [`DebouncedSearch`] instead
    /// of calling this directly.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.apply(|f| f.search = if term.is_empty() { None } else { Some(term) });
    }

    /// Set or clear the sort order.
    pub fn set_sort(&mut self, sort: Option<SortBy>) {
        self.apply(|f| f.sort_by = sort);
    }

    /// Change the page size.
    pub fn set_per_page(&mut self, per_page: u32) {
        self.apply(|f| f.per_page = per_page.clamp(1, aci_core::filters::MAX_PER_PAGE));
    }

    /// Navigate to a page of the current result set. The only mutation
    /// that does not reset the page.
    pub fn set_page(&mut self, page: u32) {
        self.filters.page = page.max(1);
        self.sync_url();
    }

    /// Reset to the empty filter state and page 1.
    pub fn clear_filters(&mut self) {
        self.filters = ArticleFilters::default();
        self.sync_url();
    }

    /// Run a filter mutation: merge, reset the page, and re-sync the URL.
    fn apply<F: FnOnce(&mut ArticleFilters)>(&mut self, mutate: F) {
        mutate(&mut self.filters);
        self.filters.page = 1;
        self.sync_url();
    }

    fn sync_url(&self) {
        let query = self.filters.to_query();
        tracing::debug!(query = %query, "Syncing filter state to URL");
        self.sync.replace_query(&query);
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

// ---------------------------------------------------------------------------
// Debounced search
// ---------------------------------------------------------------------------

/// Search-box adapter: feeds keystrokes through a [`Debouncer`] so only
/// the last input within the quiet window lands in
/// [`FilterController::set_search`].
///
/// Dropping the adapter (component teardown) cancels any pending update.
pub struct DebouncedSearch<S>
where
    S: UrlSync + Send + 'static,
{
    controller: Arc<Mutex<FilterController<S>>>,
    debouncer: Debouncer,
}

impl<S> DebouncedSearch<S>
where
    S: UrlSync + Send + 'static,
{
    /// Wrap a shared controller with the standard 300ms window.
    pub fn new(controller: Arc<Mutex<FilterController<S>>>) -> Self {
        Self::with_delay(controller, SEARCH_DEBOUNCE)
    }

    pub fn with_delay(controller: Arc<Mutex<FilterController<S>>>, delay: Duration) -> Self {
        Self {
            controller,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Record a keystroke. Supersedes any pending, not-yet-applied input.
    pub fn input(&mut self, term: impl Into<String>) {
        let term = term.into();
        let controller = Arc::clone(&self.controller);
        self.debouncer.call(move || {
            if let Ok(mut controller) = controller.lock() {
                controller.set_search(term);
            }
        });
    }

    /// Cancel any pending input without applying it.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    /// True while an input is waiting out the quiet window.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
