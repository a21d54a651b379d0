//! Domain entities - posts, dashboard statistics and feed payloads.

mod feeds;
mod health;
mod post;
mod stats;

pub use feeds::{
    Coordinates, CurrentWeather, Feed, FeedPayload, Location, Trend, TrendsPayload, WeatherPayload,
    WeatherReport, settle,
};
pub use health::HealthStatus;
pub use post::{NewPost, Platform, Post, PostPatch, PostQuery, PostStatus, UnknownVariant};
pub use stats::{Breakdown, DashboardStats};
