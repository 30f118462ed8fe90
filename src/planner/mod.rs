//! Drill Session Planner
//!
//! Selects the day's drills for a child and keeps the per-child recent set.
//!
//! ## Session algorithm
//!
//! 1. Filter the catalog by equipment
//! 2. Drop drills from the child's previous session (unless `ignore_recent`)
//! 3. Group the rest into families, in catalog encounter order
//! 4. Take up to `session_size` families, resolving each to its target level
//! 5. Pad from unused families if too few were available
//! 6. Replace the child's recent set with the chosen ids
//!
//! Selection is deterministic: same catalog, store and request give the same session.

pub mod progression;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::error::{require_child_id, CoachError};
use crate::store::TrainingStore;
use crate::types::{Drill, DrillId, DrillRow, Equipment, FamilyKey, Session, SessionRecord};

pub use progression::{family_feedback, next_level, resolve_drill};

/// Inputs for one planner invocation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SessionRequest {
    pub child_id: String,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub ignore_recent: bool,
}

impl SessionRequest {
    pub fn new(child_id: impl Into<String>, equipment: Equipment) -> Self {
        Self {
            child_id: child_id.into(),
            equipment,
            ignore_recent: false,
        }
    }

    pub fn ignoring_recent(mut self) -> Self {
        self.ignore_recent = true;
        self
    }
}

/// Plan today's session for a child.
///
/// An empty catalog slice yields an empty session with `nothing_to_train`
/// set, not an error.
pub fn plan_session(
    store: &mut dyn TrainingStore,
    catalog: &Catalog,
    config: &PlannerConfig,
    request: &SessionRequest,
    now: DateTime<Utc>,
) -> Result<Session, CoachError> {
    let child_id = require_child_id(&request.child_id)?;
    let history = store.feedback_for_child(child_id)?;
    let recent: HashSet<DrillId> = if request.ignore_recent {
        HashSet::new()
    } else {
        store.recent_drills(child_id)?.into_iter().collect()
    };

    let candidates = Catalog::group(
        catalog
            .by_equipment(request.equipment)
            .filter(|d| !recent.contains(&d.id)),
    );

    let mut selected: Vec<&Drill> =
        Vec::with_capacity(config.session_size.min(catalog.len()));
    let mut used: HashSet<FamilyKey> = HashSet::new();

    for family in candidates.iter().take(config.session_size) {
        selected.push(resolve_drill(catalog, family, &history, config));
        used.insert(family.key.clone());
    }

    // Too few non-recent families: pad from the remaining ones, recent or not.
    if selected.len() < config.session_size {
        for family in catalog.families(request.equipment) {
            if selected.len() >= config.session_size {
                break;
            }
            if used.contains(&family.key) {
                continue;
            }
            selected.push(resolve_drill(catalog, &family, &history, config));
            used.insert(family.key.clone());
        }
    }

    let drill_ids: Vec<DrillId> = selected.iter().map(|d| d.id).collect();
    store.set_recent_drills(child_id, drill_ids.clone())?;

    let session_id = store.allocate_session_id();
    store.record_session(SessionRecord {
        session_id,
        child_id: child_id.to_string(),
        equipment: request.equipment,
        drill_ids: drill_ids.clone(),
        created_at: now,
        swap_used: false,
    })?;

    if selected.is_empty() {
        info!(
            child_id = %child_id,
            equipment = %request.equipment,
            "No drills available, nothing to train"
        );
    } else {
        debug!(
            child_id = %child_id,
            session_id,
            drills = ?drill_ids,
            ignore_recent = request.ignore_recent,
            "Session planned"
        );
    }

    Ok(Session {
        session_id,
        child_id: child_id.to_string(),
        equipment: request.equipment,
        nothing_to_train: selected.is_empty(),
        drills: selected.into_iter().map(DrillRow::from).collect(),
    })
}

/// Family keys of the drills in the child's current session.
fn current_session_families(
    store: &dyn TrainingStore,
    catalog: &Catalog,
    child_id: &str,
) -> Result<HashSet<FamilyKey>, CoachError> {
    Ok(store
        .latest_session(child_id)?
        .map(|s| {
            s.drill_ids
                .iter()
                .filter_map(|id| catalog.get(*id))
                .map(Drill::family_key)
                .collect()
        })
        .unwrap_or_default())
}

/// Optional extra drills: families outside the current session, level-resolved.
///
/// Read-only; the recent set is left untouched.
pub fn bonus_drills(
    store: &dyn TrainingStore,
    catalog: &Catalog,
    config: &PlannerConfig,
    child_id: &str,
    equipment: Equipment,
) -> Result<Vec<DrillRow>, CoachError> {
    let child_id = require_child_id(child_id)?;
    let history = store.feedback_for_child(child_id)?;
    let in_session = current_session_families(store, catalog, child_id)?;

    Ok(catalog
        .families(equipment)
        .iter()
        .filter(|f| !in_session.contains(&f.key))
        .take(config.bonus_limit)
        .map(|f| DrillRow::from(resolve_drill(catalog, f, &history, config)))
        .collect())
}

/// Replace one drill of the current session with the next unused family.
///
/// Allowed once per session.
pub fn swap_drill(
    store: &mut dyn TrainingStore,
    catalog: &Catalog,
    config: &PlannerConfig,
    child_id: &str,
    drill_id: DrillId,
) -> Result<DrillRow, CoachError> {
    let child_id = require_child_id(child_id)?;
    let mut session = store
        .latest_session(child_id)?
        .ok_or_else(|| CoachError::NoCurrentSession(child_id.to_string()))?;

    if session.swap_used {
        return Err(CoachError::SwapAlreadyUsed(session.session_id));
    }
    let slot = session
        .drill_ids
        .iter()
        .position(|&id| id == drill_id)
        .ok_or(CoachError::DrillNotInSession {
            drill_id,
            session_id: session.session_id,
        })?;

    let in_session = current_session_families(store, catalog, child_id)?;
    let history = store.feedback_for_child(child_id)?;
    let families = catalog.families(session.equipment);
    let replacement = families
        .iter()
        .find(|f| !in_session.contains(&f.key))
        .map(|f| resolve_drill(catalog, f, &history, config))
        .ok_or(CoachError::NoReplacement(drill_id))?;

    session.drill_ids[slot] = replacement.id;
    session.swap_used = true;
    store.set_recent_drills(child_id, session.drill_ids.clone())?;
    let session_id = session.session_id;
    store.update_session(session)?;

    info!(
        child_id = %child_id,
        session_id,
        from = drill_id,
        to = replacement.id,
        "Drill swapped"
    );
    Ok(DrillRow::from(replacement))
}
