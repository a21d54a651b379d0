//! Health check endpoint.

use actix_web::{HttpResponse, web};
use pulse_shared::dto::{BackendHealth, HealthResponse};

use crate::state::AppState;

/// Health check endpoint - returns server status and whether the posts
/// backend answers its own health check.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let backend = match state.posts.health().await {
        Ok(health) => BackendHealth {
            reachable: true,
            status: Some(health.status.clone()),
            database: health.database,
            total_posts: health.total_posts,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Posts backend health check failed");
            BackendHealth {
                reachable: false,
                status: None,
                database: None,
                total_posts: None,
            }
        }
    };

    let healthy = backend.reachable && backend.status.as_deref() == Some("healthy");
    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        backend,
    };

    HttpResponse::Ok().json(response)
}
