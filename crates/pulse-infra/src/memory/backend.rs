//! In-memory posts backend.
//!
//! Mirrors the contract of the real backend closely enough to run the
//! dashboard without one: newest posts first, backend-computed engagement
//! rate, field validation on writes, per-platform and per-status counts.
//! Note: Data is lost on process restart.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use pulse_core::ApiError;
use pulse_core::domain::{
    Breakdown, Coordinates, DashboardStats, HealthStatus, Location, NewPost, Platform, Post,
    PostPatch, PostQuery, PostStatus, TrendsPayload, WeatherPayload,
};
use pulse_core::ports::{ExternalFeeds, PostsApi};

const TITLE_MAX_CHARS: usize = 200;
const RECENT_POSTS: usize = 5;
const DEFAULT_LATITUDE: &str = "40.7128";
const DEFAULT_LONGITUDE: &str = "-74.0060";

/// One call received by the in-memory backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListPosts(PostQuery),
    GetPost(i64),
    CreatePost(NewPost),
    UpdatePost(i64, Post),
    PatchPost(i64, PostPatch),
    DeletePost(i64),
    DashboardStats,
    Health,
    SocialTrends,
    Weather(Option<Coordinates>),
}

struct Store {
    /// Newest first.
    posts: Vec<Post>,
    next_id: i64,
}

/// In-memory implementation of both API ports.
pub struct InMemorySocialApi {
    store: RwLock<Store>,
    trends: Option<TrendsPayload>,
    weather: Option<WeatherPayload>,
    journal: RwLock<Vec<ApiCall>>,
    offline: bool,
}

impl InMemorySocialApi {
    pub fn new() -> Self {
        Self::from_store(Store {
            posts: Vec::new(),
            next_id: 1,
        })
    }

    /// Pre-load posts, oldest first.
    pub fn with_posts(posts: impl IntoIterator<Item = NewPost>) -> Self {
        let mut store = Store {
            posts: Vec::new(),
            next_id: 1,
        };
        for new_post in posts {
            store.insert(new_post);
        }
        Self::from_store(store)
    }

    fn from_store(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
            trends: None,
            weather: None,
            journal: RwLock::new(Vec::new()),
            offline: false,
        }
    }

    /// Serve `payload` from the trends endpoint.
    pub fn with_trends(mut self, payload: TrendsPayload) -> Self {
        self.trends = Some(payload);
        self
    }

    /// Serve `payload` from the weather endpoint.
    pub fn with_weather(mut self, payload: WeatherPayload) -> Self {
        self.weather = Some(payload);
        self
    }

    /// Answer every call with a transport failure, the way an unreachable
    /// backend does. Calls are still journaled.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Every call received so far, in order.
    pub async fn calls(&self) -> Vec<ApiCall> {
        self.journal.read().await.clone()
    }

    async fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        self.journal.write().await.push(call);
        if self.offline {
            return Err(ApiError::Transport("backend offline".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemorySocialApi {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    fn insert(&mut self, new_post: NewPost) -> Post {
        let now = Utc::now();
        let mut post = new_post.with_id(self.next_id);
        post.created_at = Some(now);
        post.updated_at = Some(now);
        self.next_id += 1;
        self.posts.insert(0, post.clone());
        post
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut Post, ApiError> {
        self.posts
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or(ApiError::NotFound)
    }
}

/// Engagement rate the way the backend computes it: percentage of
/// impressions that engaged, two decimals, 0 without impressions.
fn engagement_rate(post: &Post) -> f64 {
    if post.impressions == 0 {
        return 0.0;
    }
    let engaged = (post.likes + post.shares + post.comments) as f64;
    (engaged / post.impressions as f64 * 100.0 * 100.0).round() / 100.0
}

fn rendered(post: &Post) -> Post {
    let mut post = post.clone();
    post.engagement_rate = Some(engagement_rate(&post));
    post
}

fn validate(title: &str, content: &str) -> Result<(), ApiError> {
    let mut errors = serde_json::Map::new();
    if title.trim().is_empty() {
        errors.insert("title".into(), json!(["This field may not be blank."]));
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.insert(
            "title".into(),
            json!([format!(
                "Ensure this field has no more than {} characters.",
                TITLE_MAX_CHARS
            )]),
        );
    }
    if content.trim().is_empty() {
        errors.insert("content".into(), json!(["This field may not be blank."]));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation {
            details: serde_json::Value::Object(errors),
        })
    }
}

#[async_trait]
impl PostsApi for InMemorySocialApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        self.record(ApiCall::ListPosts(*query)).await?;
        let store = self.store.read().await;
        Ok(store
            .posts
            .iter()
            .filter(|p| query.matches(p))
            .map(rendered)
            .collect())
    }

    async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        self.record(ApiCall::GetPost(id)).await?;
        let store = self.store.read().await;
        store
            .posts
            .iter()
            .find(|p| p.id == Some(id))
            .map(rendered)
            .ok_or(ApiError::NotFound)
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.record(ApiCall::CreatePost(post.clone())).await?;
        validate(&post.title, &post.content)?;

        let mut store = self.store.write().await;
        let created = store.insert(post.clone());
        tracing::debug!(post_id = ?created.id, "Post created in memory");
        Ok(rendered(&created))
    }

    async fn update_post(&self, id: i64, post: &Post) -> Result<Post, ApiError> {
        self.record(ApiCall::UpdatePost(id, post.clone())).await?;
        let mut store = self.store.write().await;
        let slot = store.find_mut(id)?;
        validate(&post.title, &post.content)?;

        let created_at = slot.created_at;
        *slot = NewPost::from(post).with_id(id);
        slot.created_at = created_at;
        slot.updated_at = Some(Utc::now());
        Ok(rendered(slot))
    }

    async fn patch_post(&self, id: i64, patch: &PostPatch) -> Result<Post, ApiError> {
        self.record(ApiCall::PatchPost(id, patch.clone())).await?;
        let mut store = self.store.write().await;
        let slot = store.find_mut(id)?;

        let mut patched = slot.clone();
        patch.apply_to(&mut patched);
        validate(&patched.title, &patched.content)?;

        patched.updated_at = Some(Utc::now());
        *slot = patched;
        Ok(rendered(slot))
    }

    async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.record(ApiCall::DeletePost(id)).await?;
        let mut store = self.store.write().await;
        let before = store.posts.len();
        store.posts.retain(|p| p.id != Some(id));
        if store.posts.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.record(ApiCall::DashboardStats).await?;
        let store = self.store.read().await;
        let posts = &store.posts;

        let avg_engagement_rate = if posts.is_empty() {
            0.0
        } else {
            let sum: f64 = posts.iter().map(engagement_rate).sum();
            (sum / posts.len() as f64 * 100.0).round() / 100.0
        };

        Ok(DashboardStats {
            total_posts: posts.len() as u64,
            total_likes: posts.iter().map(|p| p.likes).sum(),
            total_shares: posts.iter().map(|p| p.shares).sum(),
            total_comments: posts.iter().map(|p| p.comments).sum(),
            total_impressions: posts.iter().map(|p| p.impressions).sum(),
            avg_engagement_rate,
            posts_by_platform: Platform::ALL
                .iter()
                .map(|platform| {
                    let count = posts.iter().filter(|p| p.platform == *platform).count();
                    (platform.as_str(), count as u64)
                })
                .collect::<Breakdown>(),
            posts_by_status: PostStatus::ALL
                .iter()
                .map(|status| {
                    let count = posts.iter().filter(|p| p.status == *status).count();
                    (status.as_str(), count as u64)
                })
                .collect(),
            recent_posts: posts.iter().take(RECENT_POSTS).map(rendered).collect(),
        })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record(ApiCall::Health).await?;
        let store = self.store.read().await;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: Some(Utc::now()),
            database: Some("in-memory".to_string()),
            total_posts: Some(store.posts.len() as u64),
        })
    }
}

#[async_trait]
impl ExternalFeeds for InMemorySocialApi {
    async fn social_trends(&self) -> Result<TrendsPayload, ApiError> {
        self.record(ApiCall::SocialTrends).await?;
        Ok(self.trends.clone().unwrap_or_else(|| TrendsPayload {
            success: false,
            error: Some("No trends source configured".to_string()),
            ..Default::default()
        }))
    }

    async fn weather(&self, location: Option<Coordinates>) -> Result<WeatherPayload, ApiError> {
        self.record(ApiCall::Weather(location)).await?;
        let Some(payload) = self.weather.clone() else {
            return Ok(WeatherPayload {
                success: false,
                error: Some("No weather source configured".to_string()),
                ..Default::default()
            });
        };

        let echoed = match location {
            Some(Coordinates { lat, lon }) => Location {
                latitude: lat.to_string(),
                longitude: lon.to_string(),
            },
            None => Location {
                latitude: DEFAULT_LATITUDE.to_string(),
                longitude: DEFAULT_LONGITUDE.to_string(),
            },
        };
        Ok(WeatherPayload {
            location: Some(echoed),
            timestamp: Some(Utc::now()),
            ..payload
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::domain::{CurrentWeather, settle};

    fn draft(title: &str, platform: Platform) -> NewPost {
        NewPost::from(&Post::new(title, format!("{title} body"), platform))
    }

    #[tokio::test]
    async fn created_posts_get_ids_and_list_newest_first() {
        let api = InMemorySocialApi::new();
        let first = api.create_post(&draft("First", Platform::Twitter)).await.unwrap();
        let second = api.create_post(&draft("Second", Platform::Facebook)).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(second.created_at.is_some());

        let titles: Vec<_> = api
            .list_posts(&PostQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let api = InMemorySocialApi::new();
        let err = api.create_post(&draft("", Platform::Twitter)).await.unwrap_err();
        match err {
            ApiError::Validation { details } => assert!(details.get("title").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(api.list_posts(&PostQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn engagement_rate_is_computed_by_the_backend() {
        let mut new_post = draft("Rated", Platform::Instagram);
        new_post.likes = 10;
        new_post.shares = 2;
        new_post.comments = 3;
        new_post.impressions = 200;
        let api = InMemorySocialApi::with_posts([new_post]);

        let post = api.get_post(1).await.unwrap();
        assert_eq!(post.engagement_rate, Some(7.5));
    }

    #[tokio::test]
    async fn update_and_patch_keep_creation_time() {
        let api = InMemorySocialApi::with_posts([draft("Old", Platform::Twitter)]);
        let original = api.get_post(1).await.unwrap();

        let mut replacement = original.clone();
        replacement.title = "New".into();
        let updated = api.update_post(1, &replacement).await.unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.created_at, original.created_at);

        let patched = api
            .patch_post(
                1,
                &PostPatch {
                    status: Some(PostStatus::Published),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.status, PostStatus::Published);
        assert_eq!(patched.title, "New");
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let api = InMemorySocialApi::new();
        assert!(matches!(api.get_post(3).await, Err(ApiError::NotFound)));
        assert!(matches!(api.delete_post(3).await, Err(ApiError::NotFound)));
        let post = Post::new("x", "y", Platform::Twitter);
        assert!(matches!(api.update_post(3, &post).await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn stats_count_every_platform_and_status_in_order() {
        let api = InMemorySocialApi::with_posts([
            draft("a", Platform::Twitter),
            draft("b", Platform::Twitter),
            draft("c", Platform::Linkedin),
        ]);

        let stats = api.dashboard_stats().await.unwrap();
        let platforms: Vec<_> = stats.posts_by_platform.iter().collect();
        assert_eq!(
            platforms,
            vec![("twitter", 2), ("instagram", 0), ("facebook", 0), ("linkedin", 1)]
        );
        assert_eq!(stats.posts_by_status.get("draft"), Some(3));
        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.recent_posts[0].title, "c");
    }

    #[tokio::test]
    async fn recent_posts_are_bounded() {
        let api = InMemorySocialApi::with_posts(
            (0..8).map(|i| draft(&format!("post {i}"), Platform::Facebook)),
        );
        let stats = api.dashboard_stats().await.unwrap();
        assert_eq!(stats.recent_posts.len(), RECENT_POSTS);
    }

    #[tokio::test]
    async fn feeds_are_unavailable_until_configured() {
        let api = InMemorySocialApi::new();
        assert!(!settle(api.social_trends().await).is_available());

        let api = api.with_weather(WeatherPayload {
            success: true,
            weather: Some(CurrentWeather {
                temperature: Some(18.0),
                ..Default::default()
            }),
            ..Default::default()
        });
        let report = settle(api.weather(None).await).available().unwrap();
        assert_eq!(report.location.unwrap().latitude, DEFAULT_LATITUDE);
    }

    #[tokio::test]
    async fn offline_backend_fails_every_call_but_journals_it() {
        let api = InMemorySocialApi::with_posts([draft("A", Platform::Twitter)]).offline();

        assert!(matches!(
            api.list_posts(&PostQuery::default()).await,
            Err(ApiError::Transport(_))
        ));
        assert!(matches!(api.delete_post(1).await, Err(ApiError::Transport(_))));
        assert!(!settle(api.social_trends().await).is_available());

        assert_eq!(
            api.calls().await,
            vec![
                ApiCall::ListPosts(PostQuery::default()),
                ApiCall::DeletePost(1),
                ApiCall::SocialTrends,
            ]
        );
    }

    #[tokio::test]
    async fn journal_records_calls_in_order() {
        let api = InMemorySocialApi::new();
        api.create_post(&draft("A", Platform::Twitter)).await.unwrap();
        api.delete_post(1).await.unwrap();

        let calls = api.calls().await;
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], ApiCall::CreatePost(_)));
        assert_eq!(calls[1], ApiCall::DeletePost(1));
    }
}
