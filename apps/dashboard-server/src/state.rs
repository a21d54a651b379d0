//! Application state - shared across all handlers.

use std::sync::Arc;

use pulse_core::domain::Coordinates;
use pulse_core::ports::{ExternalFeeds, PostsApi};
use pulse_infra::InMemorySocialApi;

#[cfg(feature = "http")]
use pulse_infra::HttpSocialApi;

use crate::config::{AppConfig, BackendKind};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostsApi>,
    pub feeds: Arc<dyn ExternalFeeds>,
    pub location: Option<Coordinates>,
}

impl AppState {
    /// Build the application state with the configured backend.
    pub fn new(config: &AppConfig) -> Self {
        let state = match config.backend {
            BackendKind::Memory => {
                tracing::info!("Serving posts from the in-memory backend");
                Self::in_memory()
            }
            #[cfg(feature = "http")]
            BackendKind::Http => match HttpSocialApi::new(&config.client) {
                Ok(client) => Self::with_backend(Arc::new(client)),
                Err(e) => {
                    tracing::error!(
                        "Failed to build posts API client: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            #[cfg(not(feature = "http"))]
            BackendKind::Http => {
                tracing::warn!("Running without http feature - using in-memory backend");
                Self::in_memory()
            }
        };

        tracing::info!("Application state initialized");

        Self {
            location: config.location,
            ..state
        }
    }

    /// One implementation serving both ports.
    pub fn with_backend<B>(backend: Arc<B>) -> Self
    where
        B: PostsApi + ExternalFeeds + 'static,
    {
        Self {
            posts: backend.clone(),
            feeds: backend,
            location: None,
        }
    }

    fn in_memory() -> Self {
        Self::with_backend(Arc::new(InMemorySocialApi::new()))
    }
}
