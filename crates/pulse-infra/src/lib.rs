//! # Pulse Infrastructure
//!
//! Concrete implementations of the ports defined in `pulse-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network client, in-memory backend only
//! - `http` - reqwest client for the posts backend and feed endpoints

pub mod memory;

#[cfg(feature = "http")]
pub mod http;

// Re-exports - In-Memory
pub use memory::{ApiCall, InMemorySocialApi};

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use http::{ClientConfig, HttpSocialApi};
