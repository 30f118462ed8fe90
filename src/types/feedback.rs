//! Feedback types: the canonical, versioned feedback schema
//!
//! Two client generations sent different shapes (`difficulty_rating` /
//! `next_action` / `session_mode` vs `felt` / `next_choice` / `mode`) with
//! different tier names. Both are accepted on input through serde aliases and
//! normalised into one schema, tagged with [`FEEDBACK_SCHEMA_VERSION`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::drill::DrillId;

/// Current feedback schema version. Payloads declaring any other version are rejected.
pub const FEEDBACK_SCHEMA_VERSION: u8 = 1;

fn default_schema_version() -> u8 {
    FEEDBACK_SCHEMA_VERSION
}

fn default_attempted() -> bool {
    true
}

/// How the drill felt to the child.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    #[serde(alias = "couldnt", alias = "hard", alias = "too_hard")]
    CouldNotDo,
    #[serde(alias = "tough", alias = "right", alias = "just_right")]
    Challenging,
    #[serde(alias = "too_easy")]
    Easy,
}

impl Rating {
    pub fn display_name(&self) -> &'static str {
        match self {
            Rating::CouldNotDo => "Could Not Do",
            Rating::Challenging => "Challenging",
            Rating::Easy => "Easy",
        }
    }
}

/// What the child chose to do next after rating a drill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    #[serde(alias = "keep", alias = "same")]
    RepeatSame,
    #[serde(alias = "easier")]
    MakeEasier,
    TinyChallenge,
    LevelUp,
    #[serde(alias = "repeat")]
    RepeatForFun,
    #[serde(alias = "showcase")]
    AddToShowcase,
}

impl NextAction {
    /// Whether choosing this action puts the family into the child's showcase.
    pub fn adds_to_showcase(&self) -> bool {
        matches!(self, NextAction::LevelUp | NextAction::AddToShowcase)
    }
}

/// Which flow the drill was done in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    Core,
    Bonus,
}

/// Inbound feedback for one drill attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackIn {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub child_id: String,
    pub drill_id: DrillId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<u64>,
    #[serde(default = "default_attempted")]
    pub attempted: bool,
    #[serde(
        default,
        alias = "difficulty_rating",
        alias = "felt",
        alias = "effort_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Rating>,
    #[serde(default, alias = "next_choice", skip_serializing_if = "Option::is_none")]
    pub next_action: Option<NextAction>,
    #[serde(default, alias = "session_mode")]
    pub mode: SessionMode,
}

impl FeedbackIn {
    /// Convenience constructor for an attempted drill with a rating.
    pub fn rated(child_id: impl Into<String>, drill_id: DrillId, rating: Rating) -> Self {
        Self {
            schema_version: FEEDBACK_SCHEMA_VERSION,
            child_id: child_id.into(),
            drill_id,
            session_id: None,
            attempted: true,
            rating: Some(rating),
            next_action: None,
            mode: SessionMode::Core,
        }
    }

    /// A drill the child skipped without trying.
    pub fn skipped(child_id: impl Into<String>, drill_id: DrillId) -> Self {
        Self {
            attempted: false,
            rating: None,
            ..Self::rated(child_id, drill_id, Rating::Challenging)
        }
    }

    pub fn with_next_action(mut self, action: NextAction) -> Self {
        self.next_action = Some(action);
        self
    }

    pub fn with_mode(mut self, mode: SessionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Stored feedback: the inbound payload plus server-assigned bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackRecord {
    /// Monotonic position in the append-only log (assigned by the store).
    pub sequence: u64,
    pub child_id: String,
    pub drill_id: DrillId,
    pub session_id: Option<u64>,
    pub attempted: bool,
    pub rating: Option<Rating>,
    pub next_action: Option<NextAction>,
    pub mode: SessionMode,
    pub recorded_at: DateTime<Utc>,
    /// Set when this record put its family into the showcase, so undo can revert it.
    #[serde(default)]
    pub added_to_showcase: bool,
}

impl FeedbackRecord {
    pub fn from_input(input: FeedbackIn, recorded_at: DateTime<Utc>) -> Self {
        Self {
            sequence: 0,
            child_id: input.child_id,
            drill_id: input.drill_id,
            session_id: input.session_id,
            attempted: input.attempted,
            rating: input.rating,
            next_action: input.next_action,
            mode: input.mode,
            recorded_at,
            added_to_showcase: false,
        }
    }
}
