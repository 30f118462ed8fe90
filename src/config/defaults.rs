//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery. Each value is the built-in
//! default for the matching config key.

// ============================================================================
// Planner
// ============================================================================

/// Drills per daily session.
pub const SESSION_SIZE: usize = 3;

/// Highest level a family can progress to.
pub const MAX_LEVEL: u8 = 7;

/// All-time "challenging" ratings for a family before the level is raised.
pub const CHALLENGING_LEVEL_UP_COUNT: usize = 2;

/// Largest accepted `planner.session_size`.
pub const MAX_SESSION_SIZE: usize = 20;

/// Maximum drills offered by the bonus picker.
pub const BONUS_LIMIT: usize = 5;

// ============================================================================
// Feedback
// ============================================================================

/// How long after submitting feedback the child may undo it (seconds).
pub const UNDO_WINDOW_SECS: u64 = 5;

// ============================================================================
// Parent Summary
// ============================================================================

/// Days counted as "this week", including today.
pub const SUMMARY_WINDOW_DAYS: u32 = 7;

/// Largest accepted `summary.window_days` (one leap year).
pub const MAX_SUMMARY_WINDOW_DAYS: u32 = 366;

/// Trailing "could not do" ratings that flag a family as stuck.
pub const STUCK_THRESHOLD: usize = 2;

// ============================================================================
// Store
// ============================================================================

/// Sessions the in-memory store keeps per child; that child's oldest are evicted.
pub const MAX_SESSIONS_PER_CHILD: usize = 100;

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "drill_coach.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DRILL_COACH_CONFIG";

/// Environment variable overriding `server.addr`.
pub const SERVER_ADDR_ENV_VAR: &str = "DRILL_COACH_SERVER_ADDR";
