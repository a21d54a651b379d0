use async_trait::async_trait;

use crate::domain::{DashboardStats, HealthStatus, NewPost, Post, PostPatch, PostQuery};
use crate::error::ApiError;

/// Posts backend - one method per endpoint, one round trip per call.
///
/// Implementations never retry and never cache.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// List posts in backend order. `PostQuery::default()` lists everything.
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError>;

    /// Fetch one post; `ApiError::NotFound` when it does not exist.
    async fn get_post(&self, id: i64) -> Result<Post, ApiError>;

    /// Persist a new post and return it with its backend-assigned id.
    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError>;

    /// Replace every editable field of post `id`.
    async fn update_post(&self, id: i64, post: &Post) -> Result<Post, ApiError>;

    /// Change only the fields set in `patch`.
    async fn patch_post(&self, id: i64, patch: &PostPatch) -> Result<Post, ApiError>;

    async fn delete_post(&self, id: i64) -> Result<(), ApiError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    /// Backend liveness check.
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
