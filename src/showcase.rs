//! Showcase: families a child has mastered and can demonstrate.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::error::{require_child_id, CoachError};
use crate::store::TrainingStore;
use crate::types::{DrillRow, FeedbackRecord, Rating, ShowcaseEntry, ShowcaseItem};

/// The child's latest rating for any drill of `family_id`.
fn latest_family_rating(
    catalog: &Catalog,
    history: &[FeedbackRecord],
    family_id: &str,
) -> Option<Rating> {
    let family = catalog.family_by_id(family_id)?;
    history
        .iter()
        .rev()
        .filter(|f| family.contains(f.drill_id))
        .find_map(|f| f.rating)
}

/// Showcase entries in insertion order, enriched with the catalog drill.
pub fn list_showcase(
    store: &dyn TrainingStore,
    catalog: &Catalog,
    child_id: &str,
) -> Result<Vec<ShowcaseItem>, CoachError> {
    let child_id = require_child_id(child_id)?;
    let history = store.feedback_for_child(child_id)?;

    Ok(store
        .showcase(child_id)?
        .into_iter()
        .map(|entry| {
            let drill = catalog.family_by_id(&entry.family_id).map(|family| {
                DrillRow::from(family.at_level(entry.level).unwrap_or_else(|| family.first()))
            });
            ShowcaseItem {
                ready_to_demo: latest_family_rating(catalog, &history, &entry.family_id)
                    == Some(Rating::Easy),
                family_id: entry.family_id,
                level: entry.level,
                drill,
            }
        })
        .collect())
}

/// Add a family explicitly. The level defaults to the family's base level.
///
/// An explicit level must exist in the family and be within `max_level`.
pub fn add_to_showcase(
    store: &mut dyn TrainingStore,
    catalog: &Catalog,
    config: &PlannerConfig,
    child_id: &str,
    family_id: &str,
    level: Option<u8>,
    now: DateTime<Utc>,
) -> Result<ShowcaseEntry, CoachError> {
    let child_id = require_child_id(child_id)?;
    let family = catalog
        .family_by_id(family_id)
        .ok_or_else(|| CoachError::UnknownFamily(family_id.to_string()))?;

    let level = match level {
        None => family.base_level(),
        Some(level) if level <= config.max_level && family.at_level(level).is_some() => level,
        Some(level) => {
            return Err(CoachError::InvalidLevel {
                family: family.family_id.to_string(),
                level,
            })
        }
    };

    let entry = ShowcaseEntry {
        family_id: family.family_id.to_string(),
        level,
        added_at: now,
    };
    store.upsert_showcase(child_id, entry.clone())?;
    info!(child_id = %child_id, family = %entry.family_id, level = entry.level, "Added to showcase");
    Ok(entry)
}

/// Returns whether an entry was removed.
pub fn remove_from_showcase(
    store: &mut dyn TrainingStore,
    child_id: &str,
    family_id: &str,
) -> Result<bool, CoachError> {
    let child_id = require_child_id(child_id)?;
    let removed = store.remove_showcase(child_id, family_id)?.is_some();
    if removed {
        info!(child_id = %child_id, family = %family_id, "Removed from showcase");
    }
    Ok(removed)
}
