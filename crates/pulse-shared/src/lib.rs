//! # Pulse Shared
//!
//! Wire types of the dashboard server: query/body DTOs and the response
//! envelopes a browser client decodes.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
