//! # Pulse Core
//!
//! The domain layer of the Pulse social dashboard.
//! This crate holds the post model, the API ports, the list filter engine and
//! the view state (form, list, dashboard, shell). It performs no I/O of its
//! own; every network call goes through a port.

pub mod domain;
pub mod error;
pub mod filter;
pub mod ports;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiError;
pub use filter::{PostFilter, Selection, filter_posts};
