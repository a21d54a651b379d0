//! Application configuration loaded from environment variables.

use std::env;

use pulse_core::domain::Coordinates;

#[cfg(feature = "http")]
use pulse_infra::ClientConfig;

/// Which implementation serves the posts API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The remote posts backend over HTTP.
    Http,
    /// Process-local store, for demos and tests.
    Memory,
}

impl BackendKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "http" => Some(BackendKind::Http),
            "memory" => Some(BackendKind::Memory),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: BackendKind,
    #[cfg(feature = "http")]
    pub client: ClientConfig,
    /// Coordinates passed to the weather feed; the backend's default
    /// location is used when unset.
    pub location: Option<Coordinates>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let backend = match env::var("PULSE_BACKEND") {
            Ok(value) => BackendKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown PULSE_BACKEND, using http");
                BackendKind::Http
            }),
            Err(_) => BackendKind::Http,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            backend,
            #[cfg(feature = "http")]
            client: ClientConfig::from_env(),
            location: Self::parse_location(
                env::var("WEATHER_LAT").ok().as_deref(),
                env::var("WEATHER_LON").ok().as_deref(),
            ),
        }
    }

    /// Both coordinates or neither. A half-set or unparseable pair is
    /// ignored with a warning.
    fn parse_location(lat: Option<&str>, lon: Option<&str>) -> Option<Coordinates> {
        match (lat, lon) {
            (None, None) => None,
            (Some(lat), Some(lon)) => match (lat.trim().parse(), lon.trim().parse()) {
                (Ok(lat), Ok(lon)) => Some(Coordinates { lat, lon }),
                _ => {
                    tracing::warn!(lat, lon, "Unparseable WEATHER_LAT/WEATHER_LON, ignoring");
                    None
                }
            },
            _ => {
                tracing::warn!("WEATHER_LAT and WEATHER_LON must be set together, ignoring");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_needs_both_coordinates() {
        assert_eq!(AppConfig::parse_location(None, None), None);
        assert_eq!(AppConfig::parse_location(Some("52.5"), None), None);
        assert_eq!(
            AppConfig::parse_location(Some("52.5"), Some("13.4")),
            Some(Coordinates { lat: 52.5, lon: 13.4 })
        );
        assert_eq!(AppConfig::parse_location(Some("north"), Some("13.4")), None);
    }

    #[test]
    fn backend_kind_is_case_insensitive() {
        assert_eq!(BackendKind::parse("Memory"), Some(BackendKind::Memory));
        assert_eq!(BackendKind::parse("HTTP"), Some(BackendKind::Http));
        assert_eq!(BackendKind::parse("sqlite"), None);
    }
}
