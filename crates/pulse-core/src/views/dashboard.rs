//! Dashboard view model: stat cards, chart series, recent posts and the two
//! decorative feed panels.

use std::borrow::Cow;

use serde::Serialize;

use crate::domain::{
    Breakdown, Coordinates, DashboardStats, Feed, Platform, Post, PostStatus, Trend,
    WeatherReport, settle,
};
use crate::ports::{ExternalFeeds, PostsApi};

/// Characters of a post body shown in the recent-posts panel.
pub const EXCERPT_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

/// One bar or pie slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: u64,
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Chart series for a breakdown, in the breakdown's own order.
pub fn chart_series(breakdown: &Breakdown) -> Vec<ChartPoint> {
    breakdown
        .iter()
        .map(|(name, value)| ChartPoint {
            name: capitalize(name),
            value,
        })
        .collect()
}

/// Display form of a body: at most `budget` characters, with an ellipsis
/// when something was cut.
///
/// A body of `budget` characters or fewer is returned unchanged, without a
/// trailing ellipsis.
pub fn excerpt(body: &str, budget: usize) -> Cow<'_, str> {
    match body.char_indices().nth(budget) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &body[..cut], ELLIPSIS)),
        None => Cow::Borrowed(body),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentPostCard {
    pub id: Option<i64>,
    pub title: String,
    pub excerpt: String,
    pub platform: Platform,
    pub status: PostStatus,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub impressions: u64,
}

impl From<&Post> for RecentPostCard {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: excerpt(&post.content, EXCERPT_CHARS).into_owned(),
            platform: post.platform,
            status: post.status,
            likes: post.likes,
            shares: post.shares,
            comments: post.comments,
            impressions: post.impressions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub avg_engagement_rate: f64,
    pub posts_by_platform: Vec<ChartPoint>,
    pub posts_by_status: Vec<ChartPoint>,
    pub recent_posts: Vec<RecentPostCard>,
    /// Present only when the trends feed answered successfully.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<Vec<Trend>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReport>,
}

impl DashboardView {
    pub fn from_stats(stats: &DashboardStats) -> Self {
        Self {
            cards: vec![
                StatCard {
                    title: "Total Posts",
                    value: stats.total_posts,
                },
                StatCard {
                    title: "Total Likes",
                    value: stats.total_likes,
                },
                StatCard {
                    title: "Total Shares",
                    value: stats.total_shares,
                },
                StatCard {
                    title: "Total Comments",
                    value: stats.total_comments,
                },
                StatCard {
                    title: "Impressions",
                    value: stats.total_impressions,
                },
            ],
            avg_engagement_rate: stats.avg_engagement_rate,
            posts_by_platform: chart_series(&stats.posts_by_platform),
            posts_by_status: chart_series(&stats.posts_by_status),
            recent_posts: stats.recent_posts.iter().map(RecentPostCard::from).collect(),
            trends: None,
            weather: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "view", rename_all = "snake_case")]
pub enum DashboardState {
    Ready(Box<DashboardView>),
    /// The stats fetch failed; the page shows a placeholder.
    Unavailable,
}

impl DashboardState {
    pub fn view(&self) -> Option<&DashboardView> {
        match self {
            DashboardState::Ready(view) => Some(view),
            DashboardState::Unavailable => None,
        }
    }
}

/// Fetch stats and both feeds concurrently and assemble the view.
///
/// Each fetch fills its own slot. A stats failure makes the whole dashboard
/// unavailable; a feed failure only drops that panel.
pub async fn load_dashboard(
    posts: &dyn PostsApi,
    feeds: &dyn ExternalFeeds,
    location: Option<Coordinates>,
) -> DashboardState {
    let (stats, trends, weather) = tokio::join!(
        posts.dashboard_stats(),
        feeds.social_trends(),
        feeds.weather(location),
    );

    let stats = match stats {
        Ok(stats) => stats,
        Err(err) => {
            tracing::warn!(error = %err, "Error fetching dashboard data");
            return DashboardState::Unavailable;
        }
    };

    let mut view = DashboardView::from_stats(&stats);
    view.trends = omit_on_failure("trends", settle(trends));
    view.weather = omit_on_failure("weather", settle(weather));
    DashboardState::Ready(Box::new(view))
}

fn omit_on_failure<T>(feed: &'static str, settled: Feed<T>) -> Option<T> {
    match settled {
        Feed::Available(data) => Some(data),
        Feed::Unavailable { reason } => {
            tracing::debug!(feed, %reason, "Feed unavailable, panel omitted");
            None
        }
    }
}
