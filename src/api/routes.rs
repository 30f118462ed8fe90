//! API route definitions
//!
//! Organizes endpoints for the drill coach:
//! - /api/v1/session/* - today's session and the one-per-session swap
//! - /api/v1/bonus/drills - optional extra drills
//! - /api/v1/feedback, /api/v1/undo - feedback log
//! - /api/v1/parent/summary, /api/v1/history - parent views
//! - /api/v1/showcase/* - mastered families
//! - /api/v1/catalog - drill library listing

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ApiState};

/// Create all API routes
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        // Sessions
        .route("/session/today", get(handlers::get_session_today))
        .route("/session/swap", post(handlers::swap_drill))
        .route("/bonus/drills", get(handlers::get_bonus_drills))
        // Feedback
        .route("/feedback", post(handlers::submit_feedback))
        .route("/undo", post(handlers::undo_feedback))
        // Parent views
        .route("/parent/summary", get(handlers::get_parent_summary))
        .route("/history", get(handlers::get_history))
        // Showcase
        .route("/showcase", get(handlers::get_showcase))
        .route("/showcase/add", post(handlers::add_showcase))
        .route("/showcase/remove", post(handlers::remove_showcase))
        // Catalog
        .route("/catalog", get(handlers::get_catalog))
        // Admin
        .route("/admin/reset", post(handlers::reset_store))
        .with_state(state)
}

/// Root-level health endpoint
pub fn root_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state)
}
