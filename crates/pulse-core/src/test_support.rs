//! Scripted stand-in for the posts backend used by the view tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    Breakdown, Coordinates, DashboardStats, HealthStatus, NewPost, Post, PostPatch, PostQuery,
    TrendsPayload, WeatherPayload,
};
use crate::error::ApiError;
use crate::ports::{ExternalFeeds, PostsApi};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(i64),
    Create(NewPost),
    Update(i64, Post),
    Patch(i64),
    Delete(i64),
    Stats,
    Health,
    Trends,
    Weather(Option<Coordinates>),
}

pub struct StubApi {
    pub posts: Mutex<Vec<Post>>,
    pub stats: Option<DashboardStats>,
    pub trends: Option<TrendsPayload>,
    pub weather: Option<WeatherPayload>,
    pub fail_writes: Option<ApiError>,
    pub fail_reads: bool,
    calls: Mutex<Vec<Call>>,
}

impl StubApi {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            stats: None,
            trends: None,
            weather: None,
            fail_writes: None,
            fail_reads: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_guard(&self) -> Result<(), ApiError> {
        match &self.fail_writes {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn read_guard(&self) -> Result<(), ApiError> {
        if self.fail_reads {
            Err(ApiError::Transport("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

pub fn post(id: i64, title: &str) -> Post {
    let mut post = Post::new(title, format!("{title} body"), Default::default());
    post.id = Some(id);
    post
}

pub fn stats() -> DashboardStats {
    DashboardStats {
        total_posts: 2,
        total_likes: 30,
        total_shares: 4,
        total_comments: 6,
        total_impressions: 400,
        avg_engagement_rate: 15.0,
        posts_by_platform: [("twitter", 1), ("instagram", 1)].into_iter().collect::<Breakdown>(),
        posts_by_status: [("draft", 2)].into_iter().collect(),
        recent_posts: vec![post(1, "One"), post(2, "Two")],
    }
}

#[async_trait]
impl PostsApi for StubApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        self.record(Call::List);
        self.read_guard()?;
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().filter(|p| query.matches(p)).cloned().collect())
    }

    async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        self.record(Call::Get(id));
        self.read_guard()?;
        let posts = self.posts.lock().unwrap();
        posts
            .iter()
            .find(|p| p.id == Some(id))
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn create_post(&self, new: &NewPost) -> Result<Post, ApiError> {
        self.record(Call::Create(new.clone()));
        self.write_guard()?;
        let mut posts = self.posts.lock().unwrap();
        let id = posts.iter().filter_map(|p| p.id).max().unwrap_or(0) + 1;
        let created = new.clone().with_id(id);
        posts.push(created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: i64, post: &Post) -> Result<Post, ApiError> {
        self.record(Call::Update(id, post.clone()));
        self.write_guard()?;
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or(ApiError::NotFound)?;
        *slot = post.clone();
        Ok(slot.clone())
    }

    async fn patch_post(&self, id: i64, patch: &PostPatch) -> Result<Post, ApiError> {
        self.record(Call::Patch(id));
        self.write_guard()?;
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or(ApiError::NotFound)?;
        patch.apply_to(slot);
        Ok(slot.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.record(Call::Delete(id));
        self.write_guard()?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != Some(id));
        if posts.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.record(Call::Stats);
        self.read_guard()?;
        self.stats.clone().ok_or(ApiError::Http {
            status: 500,
            body: String::new(),
        })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record(Call::Health);
        self.read_guard()?;
        Ok(HealthStatus {
            status: "healthy".into(),
            timestamp: None,
            database: None,
            total_posts: None,
        })
    }
}

#[async_trait]
impl ExternalFeeds for StubApi {
    async fn social_trends(&self) -> Result<TrendsPayload, ApiError> {
        self.record(Call::Trends);
        self.trends.clone().ok_or(ApiError::Http {
            status: 503,
            body: String::new(),
        })
    }

    async fn weather(&self, location: Option<Coordinates>) -> Result<WeatherPayload, ApiError> {
        self.record(Call::Weather(location));
        self.weather
            .clone()
            .ok_or(ApiError::Transport("timed out".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_check_is_journaled() {
        let api = StubApi::new(vec![]);
        assert!(api.health().await.unwrap().is_healthy());

        let mut failing = StubApi::new(vec![]);
        failing.fail_reads = true;
        assert!(failing.health().await.is_err());

        assert_eq!(api.calls(), vec![Call::Health]);
        assert_eq!(failing.calls(), vec![Call::Health]);
    }
}
