//! HTTP-level tests for `POST /api/media/map`.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;

#[tokio::test]
async fn curated_title_returns_curated_mapping() {
    let app = common::build_test_app();
    let response = post_json(
        app.router,
        "/api/media/map",
        json!({"title": "  Bohemian RHAPSODY ", "type": "song"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["source"], "curated");
    assert_eq!(json["confidence"], 1.0);
    assert_eq!(json["type"], "song");
    assert_eq!(json["canonical_title"], "Bohemian Rhapsody");
    assert_eq!(json["traits"]["bravery"], 0.9);
    assert_eq!(app.classifier.calls(), 0);
}

#[tokio::test]
async fn uncurated_title_is_inferred_then_served_from_cache() {
    let app = common::build_test_app();
    let body = json!({"title": "Yellow", "type": "song"});

    let response = post_json(app.router.clone(), "/api/media/map", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["source"], "inferred");
    assert_eq!(first["normalized_title"], "yellow");
    assert_eq!(first["confidence"], 0.9);
    assert_eq!(first["traits"]["humor"], 1.0);
    assert!(first["createdAt"].is_string());

    let second = body_json(post_json(app.router, "/api/media/map", body).await).await;
    assert_eq!(second["createdAt"], first["createdAt"]);
    assert_eq!(app.classifier.calls(), 1);
    assert_eq!(app.resolver.in_flight_count(), 0);
}

#[tokio::test]
async fn refresh_reruns_inference() {
    let app = common::build_test_app();

    post_json(
        app.router.clone(),
        "/api/media/map",
        json!({"title": "Inception", "type": "movie"}),
    )
    .await;
    let response = post_json(
        app.router,
        "/api/media/map",
        json!({"title": "inception", "type": "movie", "refresh": true}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["input"], "inception");
    assert_eq!(app.classifier.calls(), 2);
    assert_eq!(app.cache.len().await, 1);
}

#[tokio::test]
async fn unavailable_inference_degrades_to_neutral() {
    let app = common::build_test_app();
    let response = post_json(
        app.router,
        "/api/media/map",
        json!({"title": "Unknown B-side", "type": "song"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["confidence"], 0.0);
    assert_eq!(json["traits"]["humor"], 0.5);
    assert!(app.cache.is_empty().await);
}

#[tokio::test]
async fn person_type_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        app.router,
        "/api/media/map",
        json!({"title": "Keanu Reeves", "type": "person"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Type must be song or movie");
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        app.router,
        "/api/media/map",
        json!({"title": "   ", "type": "movie"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(app.classifier.calls(), 0);
}

#[tokio::test]
async fn body_without_type_returns_400_with_error_shape() {
    let app = common::build_test_app();
    let response = post_json(app.router, "/api/media/map", json!({"title": "Yellow"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("type"));
}
