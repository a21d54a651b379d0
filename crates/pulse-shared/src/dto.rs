//! Data Transfer Objects - request/response types for the dashboard API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query of `GET /api/views/shell`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellQuery {
    /// `dashboard` or `posts`; the shell starts on the dashboard.
    #[serde(default)]
    pub tab: Option<String>,
}

/// Query of `GET /api/views/posts`. Empty values and `all` mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /api/views/posts/form`.
///
/// Values are raw input text keyed by field name (`title`, `likes`,
/// `scheduled_time`, ...), applied in key order on top of the form's
/// initial state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSubmission {
    /// Edit this post; create a new one when absent.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Liveness of the posts backend as seen from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<u64>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub backend: BackendHealth,
}
