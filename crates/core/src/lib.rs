//! Domain logic for the ACI content operations dashboard.
//!
//! This crate is pure: no I/O, no clocks, no global state. It defines the
//! multi-role article approval workflow (gates, statuses, role permissions,
//! transitions) and the list-filter model with its URL query-string codec.
//! The API client and the filter controller crates both build on it.

pub mod approval;
pub mod article;
pub mod error;
pub mod filters;
pub mod permissions;
pub mod roles;
