//! Ports - trait definitions for the remote services the dashboard talks to.
//! These are the "interfaces" that infrastructure must implement.

mod feeds;
mod posts_api;

pub use feeds::ExternalFeeds;
pub use posts_api::PostsApi;
