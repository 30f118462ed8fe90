//! API route handlers
//!
//! Thin adapters between HTTP and the library operations. Every handler
//! returns `Response` via [`ApiResponse::ok`] or [`ApiErrorResponse`].
//! Handlers that change training state hold the store write lock for the
//! whole operation.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, warn};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::error::{CoachError, ErrorCode};
use crate::planner::SessionRequest;
use crate::store::{StoreStats, TrainingStore};
use crate::types::{DrillId, DrillRow, Equipment, FeedbackIn};
use crate::{feedback, history, planner, showcase, summary};

// ============================================================================
// API State
// ============================================================================

/// Store shared by every request.
pub type SharedStore = Arc<RwLock<Box<dyn TrainingStore>>>;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub store: SharedStore,
    pub catalog: Arc<Catalog>,
    pub config: Arc<AppConfig>,
    pub started_at: DateTime<Utc>,
}

impl ApiState {
    pub fn new(store: Box<dyn TrainingStore>, catalog: Catalog, config: AppConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Map a library error onto the HTTP error envelope.
fn error_response(err: CoachError) -> Response {
    let code = err.code();
    if code == ErrorCode::InternalError {
        error!(error = %err, "Request failed");
    }
    ApiErrorResponse::new(code, err.to_string())
}

fn respond<T: Serialize>(result: Result<T, CoachError>) -> Response {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => error_response(e),
    }
}

fn query_rejected(rejection: QueryRejection) -> Response {
    ApiErrorResponse::bad_request(format!("Invalid query: {}", rejection.body_text()))
}

fn json_rejected(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "Rejected request body");
    ApiErrorResponse::bad_request(format!("Invalid body: {}", rejection.body_text()))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChildQuery {
    pub child_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BonusQuery {
    pub child_id: String,
    #[serde(default)]
    pub equipment: Equipment,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub equipment: Option<Equipment>,
}

#[derive(Debug, Deserialize)]
pub struct SwapRequest {
    pub child_id: String,
    pub drill_id: DrillId,
}

#[derive(Debug, Deserialize)]
pub struct UndoRequest {
    pub child_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ShowcaseAddRequest {
    pub child_id: String,
    pub family_id: String,
    #[serde(default)]
    pub level: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ShowcaseRemoveRequest {
    pub child_id: String,
    pub family_id: String,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: i64,
    pub store_backend: &'static str,
    pub store: StoreStats,
    pub catalog_drills: usize,
}

/// GET /health
pub async fn get_health(State(state): State<ApiState>) -> Response {
    let store = state.store.read().await;
    ApiResponse::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        store_backend: store.backend_name(),
        store: store.stats(),
        catalog_drills: state.catalog.len(),
    })
}

// ============================================================================
// Sessions
// ============================================================================

/// GET /api/v1/session/today?child_id&equipment&ignore_recent
pub async fn get_session_today(
    State(state): State<ApiState>,
    query: Result<Query<SessionRequest>, QueryRejection>,
) -> Response {
    let Query(request) = match query {
        Ok(q) => q,
        Err(rejection) => return query_rejected(rejection),
    };
    let mut store = state.store.write().await;
    respond(planner::plan_session(
        &mut **store,
        &state.catalog,
        &state.config.planner,
        &request,
        Utc::now(),
    ))
}

/// POST /api/v1/session/swap
pub async fn swap_drill(
    State(state): State<ApiState>,
    body: Result<Json<SwapRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let mut store = state.store.write().await;
    respond(planner::swap_drill(
        &mut **store,
        &state.catalog,
        &state.config.planner,
        &request.child_id,
        request.drill_id,
    ))
}

/// GET /api/v1/bonus/drills?child_id&equipment
pub async fn get_bonus_drills(
    State(state): State<ApiState>,
    query: Result<Query<BonusQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_rejected(rejection),
    };
    let store = state.store.read().await;
    respond(planner::bonus_drills(
        &**store,
        &state.catalog,
        &state.config.planner,
        &query.child_id,
        query.equipment,
    ))
}

// ============================================================================
// Feedback
// ============================================================================

/// POST /api/v1/feedback
pub async fn submit_feedback(
    State(state): State<ApiState>,
    body: Result<Json<FeedbackIn>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let mut store = state.store.write().await;
    respond(feedback::submit_feedback(
        &mut **store,
        &state.catalog,
        &state.config.planner,
        input,
        Utc::now(),
    ))
}

/// POST /api/v1/undo
pub async fn undo_feedback(
    State(state): State<ApiState>,
    body: Result<Json<UndoRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let mut store = state.store.write().await;
    respond(feedback::undo_last(
        &mut **store,
        &state.catalog,
        &state.config.feedback,
        &request.child_id,
        Utc::now(),
    ))
}

// ============================================================================
// Parent View
// ============================================================================

/// GET /api/v1/parent/summary?child_id
pub async fn get_parent_summary(
    State(state): State<ApiState>,
    query: Result<Query<ChildQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_rejected(rejection),
    };
    let store = state.store.read().await;
    respond(summary::parent_summary(
        &**store,
        &state.catalog,
        &state.config.planner,
        &state.config.summary,
        &query.child_id,
        Utc::now(),
    ))
}

/// GET /api/v1/history?child_id
pub async fn get_history(
    State(state): State<ApiState>,
    query: Result<Query<ChildQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_rejected(rejection),
    };
    let store = state.store.read().await;
    respond(history::session_history(
        &**store,
        &state.catalog,
        &query.child_id,
    ))
}

// ============================================================================
// Showcase
// ============================================================================

/// GET /api/v1/showcase?child_id
pub async fn get_showcase(
    State(state): State<ApiState>,
    query: Result<Query<ChildQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_rejected(rejection),
    };
    let store = state.store.read().await;
    respond(showcase::list_showcase(
        &**store,
        &state.catalog,
        &query.child_id,
    ))
}

/// POST /api/v1/showcase/add
pub async fn add_showcase(
    State(state): State<ApiState>,
    body: Result<Json<ShowcaseAddRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let mut store = state.store.write().await;
    respond(showcase::add_to_showcase(
        &mut **store,
        &state.catalog,
        &state.config.planner,
        &request.child_id,
        &request.family_id,
        request.level,
        Utc::now(),
    ))
}

/// POST /api/v1/showcase/remove
pub async fn remove_showcase(
    State(state): State<ApiState>,
    body: Result<Json<ShowcaseRemoveRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let mut store = state.store.write().await;
    respond(
        showcase::remove_from_showcase(&mut **store, &request.child_id, &request.family_id)
            .map(|removed| serde_json::json!({ "removed": removed })),
    )
}

// ============================================================================
// Catalog & Admin
// ============================================================================

/// GET /api/v1/catalog?equipment
pub async fn get_catalog(
    State(state): State<ApiState>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return query_rejected(rejection),
    };
    let drills: Vec<DrillRow> = match query.equipment {
        Some(eq) => state.catalog.by_equipment(eq).map(DrillRow::from).collect(),
        None => state.catalog.drills().iter().map(DrillRow::from).collect(),
    };
    ApiResponse::ok(drills)
}

/// POST /api/v1/admin/reset
pub async fn reset_store(State(state): State<ApiState>) -> Response {
    if !state.config.server.allow_reset {
        return ApiErrorResponse::new(
            ErrorCode::Forbidden,
            "Store reset is disabled (server.allow_reset = false)",
        );
    }
    let mut store = state.store.write().await;
    store.reset();
    ApiResponse::ok(serde_json::json!({ "reset": true }))
}
