//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the /api/v1/* endpoints using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port.

use drill_coach::api::{create_app, ApiState};
use drill_coach::config::AppConfig;
use drill_coach::{Catalog, InMemoryStore, TrainingStore};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_state(config: AppConfig) -> ApiState {
    ApiState::new(Box::new(InMemoryStore::new()), Catalog::builtin(), config)
}

fn create_test_app() -> (Router, ApiState) {
    let state = create_test_state(AppConfig::default());
    (create_app(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

// ============================================================================
// Envelope & Health
// ============================================================================

#[tokio::test]
async fn test_get_endpoints_return_200() {
    let (app, _) = create_test_app();
    let endpoints = [
        "/health",
        "/api/v1/health",
        "/api/v1/session/today?child_id=ava",
        "/api/v1/bonus/drills?child_id=ava",
        "/api/v1/parent/summary?child_id=ava",
        "/api/v1/showcase?child_id=ava",
        "/api/v1/history?child_id=ava",
        "/api/v1/catalog",
    ];

    for endpoint in &endpoints {
        let (status, body) = get(&app, endpoint).await;
        assert_eq!(status, StatusCode::OK, "GET {endpoint}");
        assert!(body.get("data").is_some(), "GET {endpoint} missing data");
        assert_eq!(body["meta"]["version"], "1", "GET {endpoint} missing meta");
    }
}

#[tokio::test]
async fn test_health_reports_store_and_catalog() {
    let (app, _) = create_test_app();
    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["store_backend"], "InMemory");
    assert_eq!(body["data"]["catalog_drills"], 18);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = create_test_app();
    let (status, _) = get(&app, "/api/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_session_today_shape() {
    let (app, _) = create_test_app();
    let (status, body) = get(&app, "/api/v1/session/today?child_id=ava&equipment=ball_only").await;
    assert_eq!(status, StatusCode::OK);

    let drills = body["data"]["drills"].as_array().unwrap();
    assert_eq!(drills.len(), 3);
    assert_eq!(drills[0]["id"], 1);
    assert_eq!(drills[0]["requirements"], "ball_only");
    assert_eq!(drills[0]["family_id"], "Toe Taps");
    assert_eq!(body["data"]["nothing_to_train"], false);
}

#[tokio::test]
async fn test_session_validation_errors() {
    let (app, _) = create_test_app();

    let (status, body) = get(&app, "/api/v1/session/today?child_id=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = get(&app, "/api/v1/session/today?child_id=ava&equipment=goalposts").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_swap_once_then_conflict() {
    let (app, _) = create_test_app();
    get(&app, "/api/v1/session/today?child_id=ava").await;

    let (status, body) = post(&app, "/api/v1/session/swap", json!({"child_id": "ava", "drill_id": 4})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["family_id"], "Wall Passes");

    let (status, body) = post(&app, "/api/v1/session/swap", json!({"child_id": "ava", "drill_id": 1})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_swap_without_session_is_404() {
    let (app, _) = create_test_app();
    let (status, _) = post(&app, "/api/v1/session/swap", json!({"child_id": "ava", "drill_id": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bonus_excludes_session_families() {
    let (app, _) = create_test_app();
    let (_, session) = get(&app, "/api/v1/session/today?child_id=ava").await;
    let (_, bonus) = get(&app, "/api/v1/bonus/drills?child_id=ava").await;

    let session_families: Vec<&Value> = session["data"]["drills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| &d["family_id"])
        .collect();
    let bonus = bonus["data"].as_array().unwrap();
    assert!(!bonus.is_empty());
    assert!(bonus.iter().all(|d| !session_families.contains(&&d["family_id"])));
}

// ============================================================================
// Feedback
// ============================================================================

#[tokio::test]
async fn test_feedback_then_level_up() {
    let (app, _) = create_test_app();
    let (status, body) = post(
        &app,
        "/api/v1/feedback",
        json!({"child_id": "ava", "drill_id": 1, "rating": "easy"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ok"], true);

    let (_, body) = get(&app, "/api/v1/session/today?child_id=ava").await;
    assert_eq!(body["data"]["drills"][0]["level"], 2);
}

#[tokio::test]
async fn test_legacy_feedback_payloads_accepted() {
    let (app, state) = create_test_app();
    let (status, _) = post(
        &app,
        "/api/v1/feedback",
        json!({"child_id": "ava", "drill_id": 4, "attempted": true, "felt": "tough", "next_choice": "repeat", "mode": "core"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(
        &app,
        "/api/v1/feedback",
        json!({"child_id": "ava", "session_id": 1, "drill_id": 5, "attempted": true, "difficulty_rating": "hard", "next_action": "make_easier", "session_mode": "bonus"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let store = state.store.read().await;
    assert_eq!(store.stats().feedback_records, 2);
}

#[tokio::test]
async fn test_feedback_errors() {
    let (app, _) = create_test_app();

    let (status, _) = post(&app, "/api/v1/feedback", json!({"child_id": "ava", "drill_id": 999, "rating": "easy"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/api/v1/feedback",
        json!({"schema_version": 9, "child_id": "ava", "drill_id": 1, "rating": "easy"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&app, "/api/v1/feedback", json!({"child_id": "ava", "drill_id": 1, "rating": "meh"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_undo_removes_latest_feedback() {
    let (app, state) = create_test_app();
    post(&app, "/api/v1/feedback", json!({"child_id": "ava", "drill_id": 1, "rating": "easy"})).await;

    let (status, body) = post(&app, "/api/v1/undo", json!({"child_id": "ava"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ok"], true);
    assert_eq!(state.store.read().await.stats().feedback_records, 0);

    let (_, body) = post(&app, "/api/v1/undo", json!({"child_id": "ava"})).await;
    assert_eq!(body["data"]["ok"], false);
}

// ============================================================================
// Parent Views & Showcase
// ============================================================================

#[tokio::test]
async fn test_summary_and_history_reflect_feedback() {
    let (app, _) = create_test_app();
    post(&app, "/api/v1/feedback", json!({"child_id": "ava", "drill_id": 1, "rating": "easy"})).await;
    post(&app, "/api/v1/feedback", json!({"child_id": "ava", "drill_id": 4, "rating": "could_not_do"})).await;

    let (_, body) = get(&app, "/api/v1/parent/summary?child_id=ava").await;
    let summary = &body["data"];
    assert_eq!(summary["sessions_this_week"], 1);
    assert_eq!(summary["current_streak_days"], 1);
    assert_eq!(summary["effort_mix"]["easy"], 1);
    assert_eq!(summary["effort_mix"]["could_not_do"], 1);
    assert_eq!(summary["progress"][0]["family_id"], "Toe Taps");
    assert_eq!(summary["progress"][0]["delta"], "up");

    let (_, body) = get(&app, "/api/v1/history?child_id=ava").await;
    let days = body["data"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["drills"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_showcase_add_list_remove() {
    let (app, _) = create_test_app();

    let (status, _) = post(&app, "/api/v1/showcase/add", json!({"child_id": "ava", "family_id": "Juggling Practice", "level": 2})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/v1/showcase?child_id=ava").await;
    assert_eq!(body["data"][0]["family_id"], "Juggling Practice");
    assert_eq!(body["data"][0]["drill"]["id"], 17);

    let (_, body) = post(&app, "/api/v1/showcase/remove", json!({"child_id": "ava", "family_id": "Juggling Practice"})).await;
    assert_eq!(body["data"]["removed"], true);

    let (status, _) = post(&app, "/api/v1/showcase/add", json!({"child_id": "ava", "family_id": "Rabona"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_showcase_add_rejects_missing_level() {
    let (app, _) = create_test_app();
    for level in [0, 3, 200] {
        let (status, body) = post(
            &app,
            "/api/v1/showcase/add",
            json!({"child_id": "ava", "family_id": "Juggling Practice", "level": level}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "level {level}");
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    let (_, body) = get(&app, "/api/v1/showcase?child_id=ava").await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_feedback_level_up_fills_showcase() {
    let (app, _) = create_test_app();
    post(
        &app,
        "/api/v1/feedback",
        json!({"child_id": "ava", "drill_id": 16, "rating": "easy", "next_action": "level_up"}),
    )
    .await;

    let (_, body) = get(&app, "/api/v1/showcase?child_id=ava").await;
    assert_eq!(body["data"][0]["family_id"], "Juggling Practice");
    assert_eq!(body["data"][0]["level"], 2);
    assert_eq!(body["data"][0]["ready_to_demo"], true);
}

// ============================================================================
// Catalog & Admin
// ============================================================================

#[tokio::test]
async fn test_catalog_filter() {
    let (app, _) = create_test_app();
    let (_, body) = get(&app, "/api/v1/catalog?equipment=ball_cones").await;
    let drills = body["data"].as_array().unwrap();
    assert_eq!(drills.len(), 3);
    assert!(drills.iter().all(|d| d["requirements"] == "ball_cones"));
}

#[tokio::test]
async fn test_reset_forbidden_unless_enabled() {
    let (app, _) = create_test_app();
    let (status, body) = post(&app, "/api/v1/admin/reset", json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let mut config = AppConfig::default();
    config.server.allow_reset = true;
    let state = create_test_state(config);
    let app = create_app(state.clone());
    post(&app, "/api/v1/feedback", json!({"child_id": "ava", "drill_id": 1, "rating": "easy"})).await;

    let (status, _) = post(&app, "/api/v1/admin/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.store.read().await.stats().feedback_records, 0);
}
