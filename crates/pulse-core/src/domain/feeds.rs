//! Schemas for the two best-effort external feeds (trends, weather).
//!
//! Both endpoints answer with a `success` flag. A payload only becomes
//! displayable data through [`FeedPayload::into_feed`]; anything else is
//! [`Feed::Unavailable`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Outcome of a feed fetch as seen by a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Feed<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Feed<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Feed::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Feed::Available(_))
    }

    pub fn available(self) -> Option<T> {
        match self {
            Feed::Available(data) => Some(data),
            Feed::Unavailable { .. } => None,
        }
    }
}

/// A feed response body that may carry displayable data.
pub trait FeedPayload {
    type Data;

    fn into_feed(self) -> Feed<Self::Data>;
}

/// Fold a fetch result into a [`Feed`]; transport and HTTP errors count as
/// unavailable like a `success: false` body does.
pub fn settle<P: FeedPayload>(result: Result<P, ApiError>) -> Feed<P::Data> {
    match result {
        Ok(payload) => payload.into_feed(),
        Err(err) => Feed::unavailable(err.to_string()),
    }
}

/// Coordinates passed to the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub engagement: u64,
    #[serde(default)]
    pub source: String,
}

/// Body of `GET /social-trends/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsPayload {
    pub success: bool,
    #[serde(default)]
    pub trends: Vec<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl FeedPayload for TrendsPayload {
    type Data = Vec<Trend>;

    fn into_feed(self) -> Feed<Vec<Trend>> {
        if self.success {
            Feed::Available(self.trends)
        } else {
            Feed::unavailable(self.error.unwrap_or_else(|| "trends feed reported failure".into()))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
    pub windspeed: Option<f64>,
    pub time: Option<String>,
    pub weathercode: Option<i64>,
}

/// Location echoed back by the weather endpoint, as sent in the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

/// Body of `GET /weather/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<CurrentWeather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub location: Option<Location>,
}

impl FeedPayload for WeatherPayload {
    type Data = WeatherReport;

    fn into_feed(self) -> Feed<WeatherReport> {
        match (self.success, self.weather) {
            (true, Some(current)) => Feed::Available(WeatherReport {
                current,
                location: self.location,
            }),
            (true, None) => Feed::unavailable("weather payload carried no reading"),
            (false, _) => {
                Feed::unavailable(self.error.unwrap_or_else(|| "weather feed reported failure".into()))
            }
        }
    }
}
