//! Route-level tests with an in-memory catalog, no store, no cache.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::util::ServiceExt;

use path_engine::catalog::{Catalog, ContentItem};
use path_engine::engine::PathEngine;
use path_engine::routes;
use path_engine::state::AppState;

fn test_app() -> Router {
    let catalog = Catalog::in_memory(vec![
        ContentItem::lesson("l1", "Counting", 1.0, &["arithmetic"]),
        ContentItem::lesson("l2", "Fractions I", 1.0, &["fractions"]),
        ContentItem::quiz("q1", "Counting quiz", 1.0, &["arithmetic"], "l1"),
    ]);
    let engine = Arc::new(PathEngine::new(catalog, None));
    routes::router(AppState::new(None, None, engine))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_service_name() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "path-engine");
}

#[tokio::test]
async fn get_path_creates_default_for_new_user() {
    let response = test_app()
        .oneshot(
            Request::get("/api/learning-path/u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let path = &json["learningPath"];
    assert_eq!(path["currentDifficultyLevel"], 1.0);
    assert_eq!(path["recommendedLessons"], serde_json::json!(["l1", "l2"]));
    assert_eq!(path["completedQuizzes"], serde_json::json!([]));
}

#[tokio::test]
async fn update_with_quiz_completion_returns_new_level() {
    let response = test_app()
        .oneshot(post_json(
            "/api/learning-path/u1/update",
            serde_json::json!({
                "contentId": "q1",
                "contentType": "quiz",
                "action": "completed",
                "score": 95.0,
                "timeSpent": 90,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "learning path updated successfully");
    let path = &json["learningPath"];
    assert_eq!(path["currentDifficultyLevel"], 2.0);
    assert_eq!(path["performanceMetrics"]["averageQuizScore"], 95.0);
}

#[tokio::test]
async fn update_rejects_out_of_range_score() {
    let response = test_app()
        .oneshot(post_json(
            "/api/learning-path/u1/update",
            serde_json::json!({
                "contentId": "q1",
                "contentType": "quiz",
                "action": "completed",
                "score": 150.0,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_rejects_unknown_content() {
    let response = test_app()
        .oneshot(post_json(
            "/api/learning-path/u1/update",
            serde_json::json!({
                "contentId": "nope",
                "contentType": "quiz",
                "action": "completed",
                "score": 80.0,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_rejects_unknown_action() {
    let response = test_app()
        .oneshot(post_json(
            "/api/learning-path/u1/update",
            serde_json::json!({
                "contentId": "l1",
                "contentType": "lesson",
                "action": "skimmed",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_a_json_404() {
    let response = test_app()
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
