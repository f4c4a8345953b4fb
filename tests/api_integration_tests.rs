//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use player_sync::{
    api::create_router,
    models::{Hand, Player},
    repository::InMemoryRepository,
    AppState, Config, NotificationKind,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn player(name: &str) -> Player {
    Player::new(
        name,
        "Spain",
        185,
        85,
        6490,
        Hand::Left,
        NaiveDate::from_ymd_opt(1986, 6, 3).unwrap(),
    )
}

fn create_state(remote: Vec<Player>) -> AppState {
    AppState::from_config(
        &Config::default(),
        InMemoryRepository::new("local"),
        InMemoryRepository::with_players("remote", remote),
    )
    .unwrap()
}

fn create_test_app() -> Router {
    create_router(create_state(vec![]))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

const NADAL: &str = r#"{"name":"Rafael Nadal","country":"Spain","height":185,"weight":85,
    "points":6490,"hand":"left","birth_date":"1986-06-03"}"#;

// == Create / Get ==

#[tokio::test]
async fn test_create_then_get_player() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/players", NADAL))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_to_json(response.into_body()).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["hand"], "left");

    let response = app
        .oneshot(empty_request("GET", "/players/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "Rafael Nadal");
}

#[tokio::test]
async fn test_create_invalid_player_is_bad_request() {
    let body = NADAL.replace("\"height\":185", "\"height\":0");
    let response = create_test_app()
        .oneshot(json_request("POST", "/players", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("height"));
}

#[tokio::test]
async fn test_get_unknown_player_is_not_found() {
    let response = create_test_app()
        .oneshot(empty_request("GET", "/players/99"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Player not found with id: 99");
}

#[tokio::test]
async fn test_get_falls_back_to_remote() {
    let app = create_router(create_state(vec![player("Remote Only")]));

    let response = app.oneshot(empty_request("GET", "/players/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "Remote Only");
}

// == Update / Delete ==

#[tokio::test]
async fn test_update_player() {
    let app = create_test_app();
    app.clone()
        .oneshot(json_request("POST", "/players", NADAL))
        .await
        .unwrap();

    let body = NADAL.replace("6490", "9999");
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/players/1", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(empty_request("GET", "/players/1")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["points"], 9999);
}

#[tokio::test]
async fn test_delete_player() {
    let app = create_test_app();
    app.clone()
        .oneshot(json_request("POST", "/players", NADAL))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/players/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 1);

    let response = app.oneshot(empty_request("GET", "/players/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_player_is_not_found() {
    let response = create_test_app()
        .oneshot(empty_request("DELETE", "/players/5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == List / Refresh ==

#[tokio::test]
async fn test_list_from_remote_mirrors_locally() {
    let app = create_router(create_state(vec![player("A"), player("B")]));

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/players"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 0);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/players?remote=true"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let response = app.oneshot(empty_request("GET", "/players")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_manual_refresh_publishes_notification() {
    let state = create_state(vec![player("A"), player("B"), player("C")]);
    let mut subscription = state.service.subscribe();
    let app = create_router(state);

    let response = app.oneshot(empty_request("POST", "/refresh")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 3);

    let notification = subscription.recv().await.unwrap();
    assert_eq!(notification.kind, NotificationKind::Refreshed);
}

#[tokio::test]
async fn test_auto_refresh_toggle() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(empty_request("PUT", "/refresh/auto"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["started"], true);
    assert_eq!(json["state"], "running");

    let response = app
        .clone()
        .oneshot(empty_request("PUT", "/refresh/auto"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["started"], false);

    let response = app
        .oneshot(empty_request("DELETE", "/refresh/auto"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// == Stats / Health ==

#[tokio::test]
async fn test_stats_track_cache_hits() {
    let app = create_test_app();
    app.clone()
        .oneshot(json_request("POST", "/players", NADAL))
        .await
        .unwrap();
    for _ in 0..2 {
        app.clone()
            .oneshot(empty_request("GET", "/players/1"))
            .await
            .unwrap();
    }

    let response = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 2);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["capacity"], 5);
    assert_eq!(json["auto_refresh"], "idle");
    assert_eq!(json["refresh_interval_ms"], 5000);
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_app()
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route() {
    let response = create_test_app()
        .oneshot(empty_request("GET", "/nonexistent"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
