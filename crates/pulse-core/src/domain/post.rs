use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social network a post is published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Twitter,
    Instagram,
    Facebook,
    Linkedin,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Linkedin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
        }
    }
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

impl PostStatus {
    pub const ALL: [PostStatus; 3] = [PostStatus::Draft, PostStatus::Published, PostStatus::Scheduled];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Scheduled => "scheduled",
        }
    }
}

/// A value outside one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! str_enum {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

str_enum!(Platform, "platform");
str_enum!(PostStatus, "status");

/// Post entity - one social-media post and its engagement counters.
///
/// `id` is `None` until the backend has persisted the record. The
/// timestamps and `engagement_rate` are backend-owned and only ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub platform: Platform,
    pub status: PostStatus,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// A client-side draft that has not been sent to the backend yet.
    pub fn new(title: impl Into<String>, content: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            platform,
            status: PostStatus::Draft,
            likes: 0,
            shares: 0,
            comments: 0,
            impressions: 0,
            engagement_rate: None,
            scheduled_time: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Body of a create call: the editable fields of a [`Post`], never an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub platform: Platform,
    pub status: PostStatus,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub impressions: u64,
    pub scheduled_time: Option<DateTime<Utc>>,
}

impl NewPost {
    /// Attach an id, producing the full record sent on update.
    pub fn with_id(self, id: i64) -> Post {
        Post {
            id: Some(id),
            title: self.title,
            content: self.content,
            platform: self.platform,
            status: self.status,
            likes: self.likes,
            shares: self.shares,
            comments: self.comments,
            impressions: self.impressions,
            engagement_rate: None,
            scheduled_time: self.scheduled_time,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<&Post> for NewPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            platform: post.platform,
            status: post.status,
            likes: post.likes,
            shares: post.shares,
            comments: post.comments,
            impressions: post.impressions,
            scheduled_time: post.scheduled_time,
        }
    }
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impressions: Option<u64>,
    /// `Some(None)` clears the schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<Option<DateTime<Utc>>>,
}

impl PostPatch {
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(platform) = self.platform {
            post.platform = platform;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(likes) = self.likes {
            post.likes = likes;
        }
        if let Some(shares) = self.shares {
            post.shares = shares;
        }
        if let Some(comments) = self.comments {
            post.comments = comments;
        }
        if let Some(impressions) = self.impressions {
            post.impressions = impressions;
        }
        if let Some(scheduled_time) = self.scheduled_time {
            post.scheduled_time = scheduled_time;
        }
    }
}

/// Server-side list filter; both fields empty lists every post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub platform: Option<Platform>,
    pub status: Option<PostStatus>,
}

impl PostQuery {
    /// Query-string pairs for the list endpoint.
    pub fn to_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if let Some(platform) = self.platform {
            pairs.push(("platform", platform.as_str()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str()));
        }
        pairs
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.platform.is_none_or(|p| p == post.platform)
            && self.status.is_none_or(|s| s == post.status)
    }
}
