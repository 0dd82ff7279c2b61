//! Response envelope types for the dashboard API.
//!
//! List endpoints wrap their payload in `{ "data": [...], "pagination":
//! {...} }`; approval actions return `{ "success": ..., "message": ...,
//! "article": {...} }` where the article snapshot is the server-confirmed
//! state.

use serde::Deserialize;

use aci_core::article::ArticleStatus;

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// One page of list results.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Simple `{ "data": ... }` envelope used by non-paginated reads.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Envelope returned by approve/reject/release/reset actions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub article: ArticleStatus,
}
