//! App Configuration - planner, feedback and summary knobs as TOML values
//!
//! Each struct implements `Default` with the values in `defaults.rs`, so the
//! service behaves identically with or without a config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a drill-coach deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$DRILL_COACH_CONFIG` env var
/// 2. `./drill_coach.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Session planning and level progression
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Feedback ingestion
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Parent summary aggregation
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Drill library source
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order:
    /// 1. `$DRILL_COACH_CONFIG` environment variable
    /// 2. `./drill_coach.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./drill_coach.toml
        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::CONFIG_FILE_NAME);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::CONFIG_FILE_NAME);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::CONFIG_FILE_NAME);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys and out-of-range values are logged as warnings; only
    /// parse errors and hard validation failures are returned.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;

        for w in super::validation::validate_soft_ranges(&config) {
            warn!("{}", w);
        }
        Ok(config)
    }

    /// Apply the `DRILL_COACH_SERVER_ADDR` override, if set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var(defaults::SERVER_ADDR_ENV_VAR) {
            if !addr.trim().is_empty() {
                self.server.addr = addr;
            }
        }
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Session size, max level, challenging count and stuck threshold must be > 0
    /// - Session size is at most `MAX_SESSION_SIZE`
    /// - Summary window is between one day and `MAX_SUMMARY_WINDOW_DAYS`
    /// - Server address must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.planner.session_size == 0 {
            errors.push("planner.session_size: must be > 0".to_string());
        } else if self.planner.session_size > defaults::MAX_SESSION_SIZE {
            errors.push(format!(
                "planner.session_size: must be <= {}",
                defaults::MAX_SESSION_SIZE
            ));
        }
        if self.planner.max_level == 0 {
            errors.push("planner.max_level: must be > 0".to_string());
        }
        if self.planner.challenging_level_up_count == 0 {
            errors.push("planner.challenging_level_up_count: must be > 0".to_string());
        }
        if self.summary.window_days == 0 {
            errors.push("summary.window_days: must be > 0".to_string());
        } else if self.summary.window_days > defaults::MAX_SUMMARY_WINDOW_DAYS {
            errors.push(format!(
                "summary.window_days: must be <= {}",
                defaults::MAX_SUMMARY_WINDOW_DAYS
            ));
        }
        if self.summary.stuck_threshold == 0 {
            errors.push("summary.stuck_threshold: must be > 0".to_string());
        }
        if self.server.addr.trim().is_empty() {
            errors.push("server.addr: must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `DRILL_COACH_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Expose `POST /api/v1/admin/reset`.
    #[serde(default)]
    pub allow_reset: bool,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            allow_reset: false,
        }
    }
}

// ============================================================================
// Planner
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Drills per session
    #[serde(default = "default_session_size")]
    pub session_size: usize,

    /// Level cap for every family
    #[serde(default = "default_max_level")]
    pub max_level: u8,

    /// All-time "challenging" ratings needed before a family levels up
    #[serde(default = "default_challenging_level_up_count")]
    pub challenging_level_up_count: usize,

    /// Maximum bonus drills offered
    #[serde(default = "default_bonus_limit")]
    pub bonus_limit: usize,
}

fn default_session_size() -> usize {
    defaults::SESSION_SIZE
}
fn default_max_level() -> u8 {
    defaults::MAX_LEVEL
}
fn default_challenging_level_up_count() -> usize {
    defaults::CHALLENGING_LEVEL_UP_COUNT
}
fn default_bonus_limit() -> usize {
    defaults::BONUS_LIMIT
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            session_size: default_session_size(),
            max_level: default_max_level(),
            challenging_level_up_count: default_challenging_level_up_count(),
            bonus_limit: default_bonus_limit(),
        }
    }
}

// ============================================================================
// Feedback
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackConfig {
    /// Seconds during which the latest feedback can be undone
    #[serde(default = "default_undo_window_secs")]
    pub undo_window_secs: u64,
}

fn default_undo_window_secs() -> u64 {
    defaults::UNDO_WINDOW_SECS
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            undo_window_secs: default_undo_window_secs(),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Days (including today) counted as "this week"
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Trailing "could not do" ratings that raise a stuck signal
    #[serde(default = "default_stuck_threshold")]
    pub stuck_threshold: usize,
}

fn default_window_days() -> u32 {
    defaults::SUMMARY_WINDOW_DAYS
}
fn default_stuck_threshold() -> usize {
    defaults::STUCK_THRESHOLD
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            stuck_threshold: default_stuck_threshold(),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// TOML drill library; the built-in library is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}
