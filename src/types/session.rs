//! Session, showcase and reporting types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::drill::{DrillId, DrillRow, Equipment};
use super::feedback::{NextAction, Rating, SessionMode};

// ============================================================================
// Sessions
// ============================================================================

/// A planned session as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub session_id: u64,
    pub child_id: String,
    pub equipment: Equipment,
    pub drills: Vec<DrillRow>,
    /// True when no drill matched the filters. Terminal state, not an error.
    pub nothing_to_train: bool,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    pub fn levels(&self) -> Vec<u8> {
        self.drills.iter().map(|d| d.level).collect()
    }
}

/// Store-side log entry for a planned session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub session_id: u64,
    pub child_id: String,
    pub equipment: Equipment,
    pub drill_ids: Vec<DrillId>,
    pub created_at: DateTime<Utc>,
    /// One swap is allowed per session.
    #[serde(default)]
    pub swap_used: bool,
}

// ============================================================================
// Showcase
// ============================================================================

/// A family the child has flagged as mastered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowcaseEntry {
    pub family_id: String,
    pub level: u8,
    pub added_at: DateTime<Utc>,
}

/// Showcase entry enriched for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowcaseItem {
    pub family_id: String,
    pub level: u8,
    pub ready_to_demo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drill: Option<DrillRow>,
}

// ============================================================================
// Parent Summary
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressDelta {
    Up,
    Same,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyProgress {
    pub family_id: String,
    pub delta: ProgressDelta,
    pub from_level: u8,
    pub to_level: u8,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffortMix {
    pub could_not_do: usize,
    pub challenging: usize,
    pub easy: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StuckSignal {
    pub family_id: String,
    pub consecutive_could_not_do: usize,
}

/// Aggregate view for the parent dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentSummary {
    pub child_id: String,
    pub sessions_this_week: usize,
    pub session_dates: Vec<NaiveDate>,
    pub current_streak_days: usize,
    pub progress: Vec<FamilyProgress>,
    pub effort_mix: EffortMix,
    pub stuck_signals: Vec<StuckSignal>,
    pub showcase: Vec<ShowcaseItem>,
}

// ============================================================================
// History
// ============================================================================

/// One feedback entry as listed in the history view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub drill_id: DrillId,
    pub title: String,
    pub family_id: Option<String>,
    pub level: Option<u8>,
    pub rating: Option<Rating>,
    pub next_action: Option<NextAction>,
    pub attempted: bool,
    pub skipped: bool,
    pub mode: SessionMode,
    pub recorded_at: DateTime<Utc>,
}

/// All feedback recorded on one UTC day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub drills: Vec<HistoryEntry>,
}
