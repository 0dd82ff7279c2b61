//! Filter/pagination controller for the article list views.
//!
//! Owns the single source of truth for list-query state, keeps it
//! synchronized with the URL query string (replace, never push), resets the
//! page on any non-page change, and debounces the search box so only the
//! last keystroke in a quiet window produces a fetch. Each list view owns
//! its own controller instance; state is never shared across views.

pub mod debounce;
pub mod filter_state;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use filter_state::{DebouncedSearch, FilterController, UrlSync};
