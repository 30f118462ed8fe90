//! Configuration Module
//!
//! Planner, feedback, summary and server settings loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `DRILL_COACH_CONFIG` environment variable (path to TOML file)
//! 2. `drill_coach.toml` in the current working directory
//! 3. Built-in defaults (`defaults.rs`)
//!
//! ## Usage
//!
//! `main` loads the config once and hands the relevant sections to the
//! router state. Library functions take the section they need explicitly:
//!
//! ```ignore
//! let config = AppConfig::load();
//! let session = planner::plan_session(&mut store, &catalog, &config.planner, &request, Utc::now())?;
//! ```

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;
