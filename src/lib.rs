//! drill-coach: daily football drill sessions for children
//!
//! Picks a small set of drills per day, one per drill family, and adapts
//! each family's level to the child's feedback.
//!
//! ## Architecture
//!
//! - **Catalog**: immutable drill library grouped into families
//! - **Planner**: session selection, level progression, bonus picks, swap
//! - **Feedback**: append-only feedback log with a short undo window
//! - **Parent views**: summary, history and showcase, computed from the log
//! - **Store**: `TrainingStore` trait holding all mutable state
//! - **API**: axum router over the operations above

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod history;
pub mod planner;
pub mod showcase;
pub mod store;
pub mod summary;
pub mod types;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{
    Drill, DrillId, DrillRow, Equipment, FamilyKey, FeedbackIn, FeedbackRecord, NextAction,
    ParentSummary, Rating, Session, SessionMode,
};

pub use catalog::{Catalog, CatalogError};
pub use error::{CoachError, ErrorCode};
pub use planner::{bonus_drills, plan_session, swap_drill, SessionRequest};
pub use store::{InMemoryStore, StoreError, TrainingStore};
