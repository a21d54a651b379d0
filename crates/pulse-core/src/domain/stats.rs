use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Post;

/// Ordered `name -> count` mapping.
///
/// Keeps entries in the order the backend sent them; chart slices are drawn
/// in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown(Vec<(String, u64)>);

impl Breakdown {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `key` to `count`, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, count: u64) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = count,
            None => self.0.push((key, count)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut breakdown = Breakdown::new();
        for (key, count) in iter {
            breakdown.insert(key, count);
        }
        breakdown
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

struct BreakdownVisitor;

impl<'de> Visitor<'de> for BreakdownVisitor {
    type Value = Breakdown;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of names to counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut breakdown = Breakdown(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((key, count)) = access.next_entry::<String, u64>()? {
            breakdown.insert(key, count);
        }
        Ok(breakdown)
    }
}

impl<'de> Deserialize<'de> for Breakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Backend-aggregated snapshot across all posts. Read-only on the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_shares: u64,
    pub total_comments: u64,
    pub total_impressions: u64,
    #[serde(default)]
    pub avg_engagement_rate: f64,
    #[serde(default)]
    pub posts_by_platform: Breakdown,
    #[serde(default)]
    pub posts_by_status: Breakdown,
    #[serde(default)]
    pub recent_posts: Vec<Post>,
}
