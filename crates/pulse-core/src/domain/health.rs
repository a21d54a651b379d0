use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness report of the posts backend (`GET /health/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub total_posts: Option<u64>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
