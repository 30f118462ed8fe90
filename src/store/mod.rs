//! TrainingStore trait: pluggable state backend
//!
//! All mutable training state sits behind this trait, never in globals:
//! - append-only feedback log
//! - per-child "recent drills" set (ids from the previous session)
//! - session log (latest entry per child is the current session)
//! - per-child showcase
//!
//! `InMemoryStore` is the only backend. A store is created per process or
//! per test and cleared with [`TrainingStore::reset`].

mod memory;

pub use memory::InMemoryStore;

use serde::Serialize;

use crate::types::{DrillId, FeedbackRecord, SessionRecord, ShowcaseEntry};

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("session {0} not found")]
    SessionNotFound(u64),
}

/// Row counts for health reporting.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StoreStats {
    pub children: usize,
    pub feedback_records: usize,
    pub sessions: usize,
}

/// Trait for pluggable training-state backends
///
/// Mutating methods take `&mut self`; callers that share a store across
/// tasks wrap it in a lock so each planner call runs to completion alone.
pub trait TrainingStore: Send + Sync {
    /// Append a feedback record, assigning and returning its sequence number.
    fn append_feedback(&mut self, record: FeedbackRecord) -> Result<u64, StoreError>;

    /// All feedback for a child, oldest first.
    fn feedback_for_child(&self, child_id: &str) -> Result<Vec<FeedbackRecord>, StoreError>;

    /// Remove and return the child's most recent feedback record.
    fn remove_last_feedback(&mut self, child_id: &str)
        -> Result<Option<FeedbackRecord>, StoreError>;

    /// Drill ids from the child's previous session.
    fn recent_drills(&self, child_id: &str) -> Result<Vec<DrillId>, StoreError>;

    /// Replace the child's recent set.
    fn set_recent_drills(&mut self, child_id: &str, drill_ids: Vec<DrillId>)
        -> Result<(), StoreError>;

    /// Allocate the next session id.
    fn allocate_session_id(&mut self) -> u64;

    /// Append a new session to the log.
    fn record_session(&mut self, session: SessionRecord) -> Result<(), StoreError>;

    /// Overwrite an existing session (matched by id).
    fn update_session(&mut self, session: SessionRecord) -> Result<(), StoreError>;

    /// The child's most recently planned session.
    fn latest_session(&self, child_id: &str) -> Result<Option<SessionRecord>, StoreError>;

    /// Showcase entries in insertion order.
    fn showcase(&self, child_id: &str) -> Result<Vec<ShowcaseEntry>, StoreError>;

    /// Insert a showcase entry, or refresh level/timestamp if the family is already present.
    fn upsert_showcase(&mut self, child_id: &str, entry: ShowcaseEntry) -> Result<(), StoreError>;

    /// Remove a family from the showcase, returning the removed entry.
    fn remove_showcase(
        &mut self,
        child_id: &str,
        family_id: &str,
    ) -> Result<Option<ShowcaseEntry>, StoreError>;

    /// Drop all state.
    fn reset(&mut self);

    fn stats(&self) -> StoreStats;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}
