//! List filter engine - the visible subset of the fetched posts.

use std::fmt;
use std::str::FromStr;

use crate::domain::{Platform, Post, PostStatus};

/// A select box value: everything, or one enum variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Selection<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// `"all"` (or an empty string) selects everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Selection::All),
            other => other.parse().map(Selection::Only),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

/// Search term plus the two select boxes of the post list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub search: String,
    pub platform: Selection<Platform>,
    pub status: Selection<PostStatus>,
}

impl PostFilter {
    pub fn new(
        search: impl Into<String>,
        platform: Selection<Platform>,
        status: Selection<PostStatus>,
    ) -> Self {
        Self {
            search: search.into(),
            platform,
            status,
        }
    }

    /// True when `post` passes all three predicates.
    pub fn matches(&self, post: &Post) -> bool {
        Matcher::new(self).matches(post)
    }

    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.platform == Selection::All && self.status == Selection::All
    }
}

struct Matcher<'a> {
    filter: &'a PostFilter,
    needle: String,
}

impl<'a> Matcher<'a> {
    fn new(filter: &'a PostFilter) -> Self {
        Self {
            filter,
            needle: filter.search.to_lowercase(),
        }
    }

    fn matches(&self, post: &Post) -> bool {
        let matches_search = self.needle.is_empty()
            || post.title.to_lowercase().contains(&self.needle)
            || post.content.to_lowercase().contains(&self.needle);

        matches_search
            && self.filter.platform.admits(&post.platform)
            && self.filter.status.admits(&post.status)
    }
}

/// Posts passing `filter`, in input order. Pure: same inputs, same output.
pub fn filter_posts<'p>(posts: &'p [Post], filter: &PostFilter) -> Vec<&'p Post> {
    let matcher = Matcher::new(filter);
    posts.iter().filter(|post| matcher.matches(post)).collect()
}
