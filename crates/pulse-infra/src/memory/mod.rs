//! In-memory backend - used when no posts backend is configured, and by tests.

mod backend;

pub use backend::{ApiCall, InMemorySocialApi};
