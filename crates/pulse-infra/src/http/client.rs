//! reqwest implementation of [`PostsApi`] and [`ExternalFeeds`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use pulse_core::ApiError;
use pulse_core::domain::{
    Coordinates, DashboardStats, HealthStatus, NewPost, Post, PostPatch, PostQuery, TrendsPayload,
    WeatherPayload,
};
use pulse_core::ports::{ExternalFeeds, PostsApi};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Backend client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix (e.g., http://localhost:8000/api)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PULSE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("PULSE_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// Whether a 4xx answer means "your input was rejected".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Read,
    Write,
}

/// Client for the posts backend and the feed endpoints it proxies.
///
/// Every method is one request; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct HttpSocialApi {
    client: Client,
    base_url: String,
}

impl HttpSocialApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::info!(base_url = %config.base_url, "Posts API client configured");

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from environment configuration.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ClientConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_url(&self, id: i64) -> String {
        self.url(&format!("/posts/{}/", id))
    }

    async fn dispatch(&self, request: RequestBuilder, kind: CallKind) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Backend unreachable");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        let body = response.text().await.unwrap_or_default();
        if kind == CallKind::Write && status.is_client_error() {
            let details =
                serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
            return Err(ApiError::Validation { details });
        }

        Err(ApiError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        kind: CallKind,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(request, kind).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PostsApi for HttpSocialApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        let mut request = self.client.get(self.url("/posts/"));
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        self.fetch(request, CallKind::Read).await
    }

    async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        self.fetch(self.client.get(self.post_url(id)), CallKind::Read)
            .await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        let request = self.client.post(self.url("/posts/")).json(post);
        self.fetch(request, CallKind::Write).await
    }

    async fn update_post(&self, id: i64, post: &Post) -> Result<Post, ApiError> {
        let request = self.client.put(self.post_url(id)).json(post);
        self.fetch(request, CallKind::Write).await
    }

    async fn patch_post(&self, id: i64, patch: &PostPatch) -> Result<Post, ApiError> {
        let request = self.client.patch(self.post_url(id)).json(patch);
        self.fetch(request, CallKind::Write).await
    }

    async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.dispatch(self.client.delete(self.post_url(id)), CallKind::Write)
            .await?;
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.fetch(
            self.client.get(self.url("/posts/dashboard_stats/")),
            CallKind::Read,
        )
        .await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.fetch(self.client.get(self.url("/health/")), CallKind::Read)
            .await
    }
}

#[async_trait]
impl ExternalFeeds for HttpSocialApi {
    async fn social_trends(&self) -> Result<TrendsPayload, ApiError> {
        self.fetch(self.client.get(self.url("/social-trends/")), CallKind::Read)
            .await
    }

    async fn weather(&self, location: Option<Coordinates>) -> Result<WeatherPayload, ApiError> {
        let mut request = self.client.get(self.url("/weather/"));
        if let Some(Coordinates { lat, lon }) = location {
            request = request.query(&[("lat", lat.to_string()), ("lon", lon.to_string())]);
        }
        self.fetch(request, CallKind::Read).await
    }
}
