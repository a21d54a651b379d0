use async_trait::async_trait;

use crate::domain::{Coordinates, TrendsPayload, WeatherPayload};
use crate::error::ApiError;

/// Third-party-backed feeds proxied by the backend.
///
/// Callers treat every failure as "data unavailable"; see
/// [`crate::domain::settle`].
#[async_trait]
pub trait ExternalFeeds: Send + Sync {
    async fn social_trends(&self) -> Result<TrendsPayload, ApiError>;

    /// Current weather; the backend picks its default location when
    /// `location` is `None`.
    async fn weather(&self, location: Option<Coordinates>) -> Result<WeatherPayload, ApiError>;
}
