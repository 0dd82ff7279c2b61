//! HTTP API collaborator for the ACI dashboard.
//!
//! Wraps the backend's REST endpoints (article lists, approval queue,
//! approval actions) using [`reqwest`]. Every mutating call validates the
//! action against [`aci_core::permissions`] before touching the network,
//! and returns the server-confirmed article state; local copies are
//! replaced with the response, never advanced optimistically.

pub mod client;
pub mod config;
pub mod error;
pub mod response;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use response::{ActionResponse, Page, Pagination};
