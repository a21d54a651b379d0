use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use pulse_core::ApiError;
use pulse_core::domain::{
    Coordinates, NewPost, Platform, Post, PostPatch, PostQuery, PostStatus, settle,
};
use pulse_core::ports::{ExternalFeeds, PostsApi};

use super::{ClientConfig, HttpSocialApi};

fn client_for(server: &MockServer) -> HttpSocialApi {
    HttpSocialApi::new(&ClientConfig {
        base_url: server.url("/api/"),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn post_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "Body",
        "platform": "twitter",
        "status": "draft",
        "likes": 0,
        "shares": 0,
        "comments": 0,
        "impressions": 0,
        "engagement_rate": 0,
        "scheduled_time": null,
        "created_at": "2026-10-16T09:00:00Z",
        "updated_at": "2026-10-16T09:00:00Z"
    })
}

#[tokio::test]
async fn list_posts_decodes_backend_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/posts/");
            then.status(200)
                .json_body(json!([post_json(2, "Newer"), post_json(1, "Older")]));
        })
        .await;

    let posts = client_for(&server)
        .list_posts(&PostQuery::default())
        .await
        .unwrap();

    mock.assert_async().await;
    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn list_posts_sends_server_side_filters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/posts/")
                .query_param("platform", "linkedin")
                .query_param("status", "published");
            then.status(200).json_body(json!([]));
        })
        .await;

    let query = PostQuery {
        platform: Some(Platform::Linkedin),
        status: Some(PostStatus::Published),
    };
    let posts = client_for(&server).list_posts(&query).await.unwrap();

    mock.assert_async().await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn create_post_sends_no_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/posts/").json_body(json!({
                "title": "A",
                "content": "B",
                "platform": "twitter",
                "status": "draft",
                "likes": 0,
                "shares": 0,
                "comments": 0,
                "impressions": 0,
                "scheduled_time": null
            }));
            then.status(201).json_body(post_json(9, "A"));
        })
        .await;

    let new_post = NewPost::from(&Post::new("A", "B", Platform::Twitter));
    let created = client_for(&server).create_post(&new_post).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, Some(9));
}

#[tokio::test]
async fn rejected_write_is_a_validation_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/posts/");
            then.status(400)
                .json_body(json!({"title": ["This field may not be blank."]}));
        })
        .await;

    let new_post = NewPost::from(&Post::new("", "B", Platform::Twitter));
    let err = client_for(&server).create_post(&new_post).await.unwrap_err();

    match err {
        ApiError::Validation { details } => {
            assert_eq!(details["title"][0], "This field may not be blank.");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_puts_full_record_to_post_url() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/posts/5/");
            then.status(200).json_body(post_json(5, "New"));
        })
        .await;

    let mut post = Post::new("New", "Body", Platform::Twitter);
    post.id = Some(5);
    let updated = client_for(&server).update_post(5, &post).await.unwrap();

    mock.assert_async().await;
    assert_eq!(updated.title, "New");
}

#[tokio::test]
async fn patch_sends_only_changed_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/api/posts/5/")
                .json_body(json!({"likes": 40}));
            then.status(200).json_body(post_json(5, "Old"));
        })
        .await;

    let patch = PostPatch {
        likes: Some(40),
        ..Default::default()
    };
    client_for(&server).patch_post(5, &patch).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn missing_post_maps_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/posts/404/");
            then.status(404).json_body(json!({"error": "Post not found"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/posts/404/");
            then.status(404).json_body(json!({"error": "Post not found"}));
        })
        .await;

    let api = client_for(&server);
    assert!(matches!(api.get_post(404).await, Err(ApiError::NotFound)));
    assert!(matches!(api.delete_post(404).await, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn delete_accepts_empty_no_content() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/posts/7/");
            then.status(204);
        })
        .await;

    client_for(&server).delete_post(7).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_on_read_is_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/posts/dashboard_stats/");
            then.status(500).body("boom");
        })
        .await;

    let err = client_for(&server).dashboard_stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, ref body } if body == "boom"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/posts/1/");
            then.status(200).body("not json");
        })
        .await;

    let err = client_for(&server).get_post(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let api = HttpSocialApi::new(&ClientConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout: Duration::from_secs(2),
    })
    .unwrap();

    let err = api.list_posts(&PostQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn dashboard_stats_keep_breakdown_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/posts/dashboard_stats/");
            then.status(200).json_body(json!({
                "total_posts": 4,
                "total_likes": 10,
                "total_shares": 2,
                "total_comments": 1,
                "total_impressions": 100,
                "avg_engagement_rate": 2.5,
                "posts_by_platform": {"twitter": 3, "instagram": 1, "facebook": 0, "linkedin": 0},
                "posts_by_status": {"draft": 1, "published": 2, "scheduled": 1},
                "recent_posts": [post_json(4, "Latest")]
            }));
        })
        .await;

    let stats = client_for(&server).dashboard_stats().await.unwrap();
    let keys: Vec<_> = stats.posts_by_platform.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["twitter", "instagram", "facebook", "linkedin"]);
    assert_eq!(stats.recent_posts.len(), 1);
}

#[tokio::test]
async fn weather_sends_coordinates_only_when_given() {
    let server = MockServer::start_async().await;
    let with_coords = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/weather/")
                .query_param("lat", "52.52")
                .query_param("lon", "13.41");
            then.status(200).json_body(json!({
                "success": true,
                "weather": {"temperature": 14.2, "windspeed": 9.1, "time": "2026-10-16T12:00", "weathercode": 3},
                "location": {"latitude": "52.52", "longitude": "13.41"}
            }));
        })
        .await;

    let api = client_for(&server);
    let payload = api
        .weather(Some(Coordinates {
            lat: 52.52,
            lon: 13.41,
        }))
        .await
        .unwrap();

    with_coords.assert_async().await;
    let report = settle(Ok(payload)).available().unwrap();
    assert_eq!(report.current.weathercode, Some(3));
}

#[tokio::test]
async fn unavailable_trends_settle_as_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/social-trends/");
            then.status(503).json_body(json!({
                "success": false,
                "error": "API request failed: timeout"
            }));
        })
        .await;

    let result = client_for(&server).social_trends().await;
    assert!(matches!(result, Err(ApiError::Http { status: 503, .. })));
    assert!(!settle(result).is_available());
}

#[tokio::test]
async fn health_check_reads_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health/");
            then.status(200).json_body(json!({
                "status": "healthy",
                "timestamp": "2026-10-16T12:00:00.000000+00:00",
                "database": "connected",
                "total_posts": 12
            }));
        })
        .await;

    let health = client_for(&server).health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.total_posts, Some(12));
}
