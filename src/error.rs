//! Errors returned by planner, feedback and showcase operations.
//!
//! An empty session is not an error: it is reported through
//! `Session::nothing_to_train`.

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;
use crate::types::DrillId;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("child_id must not be empty")]
    MissingChildId,

    #[error("unsupported feedback schema version {found} (expected {expected})")]
    UnsupportedSchemaVersion { found: u8, expected: u8 },

    #[error("unknown drill id {0}")]
    UnknownDrill(DrillId),

    #[error("unknown drill family '{0}'")]
    UnknownFamily(String),

    #[error("family '{family}' has no level {level}")]
    InvalidLevel { family: String, level: u8 },

    #[error("no session planned yet for child '{0}'")]
    NoCurrentSession(String),

    #[error("drill {drill_id} is not part of session {session_id}")]
    DrillNotInSession { drill_id: DrillId, session_id: u64 },

    #[error("swap already used for session {0}")]
    SwapAlreadyUsed(u64),

    #[error("no replacement drill available for drill {0}")]
    NoReplacement(DrillId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Machine-readable error class, serialized as `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    Conflict,
    Forbidden,
    InternalError,
}

impl CoachError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoachError::MissingChildId
            | CoachError::UnsupportedSchemaVersion { .. }
            | CoachError::InvalidLevel { .. } => ErrorCode::BadRequest,
            CoachError::UnknownDrill(_)
            | CoachError::UnknownFamily(_)
            | CoachError::NoCurrentSession(_)
            | CoachError::DrillNotInSession { .. } => ErrorCode::NotFound,
            CoachError::SwapAlreadyUsed(_) | CoachError::NoReplacement(_) => ErrorCode::Conflict,
            CoachError::Store(_) => ErrorCode::InternalError,
        }
    }
}

/// Reject blank child identifiers before touching the store.
pub fn require_child_id(child_id: &str) -> Result<&str, CoachError> {
    let trimmed = child_id.trim();
    if trimmed.is_empty() {
        Err(CoachError::MissingChildId)
    } else {
        Ok(trimmed)
    }
}
