//! Level progression
//!
//! A family's level is never stored. It is derived from the child's feedback
//! on any drill of that family, most recent first:
//!
//! | latest rating  | next level                                         |
//! |----------------|----------------------------------------------------|
//! | none (no data) | family base level                                  |
//! | easy           | current + 1, capped at `max_level`                 |
//! | could_not_do   | current - 1, floored at 1                          |
//! | challenging    | current, or +1 once the family has `challenging_level_up_count` challenging ratings |
//! | skipped        | current                                            |
//!
//! "current" is the level of the drill the latest feedback was given on.
//! The challenging count is all-time for the family, not a consecutive run.

use tracing::debug;

use crate::catalog::{Catalog, Family};
use crate::config::PlannerConfig;
use crate::types::{Drill, FeedbackRecord, Rating};

/// Feedback entries (oldest first) that belong to any drill of `family`.
pub fn family_feedback<'h>(
    history: &'h [FeedbackRecord],
    family: &Family<'_>,
) -> Vec<&'h FeedbackRecord> {
    history.iter().filter(|f| family.contains(f.drill_id)).collect()
}

/// Target level for the next selection from `family`.
///
/// `family_history` must be oldest first and filtered to the family.
pub fn next_level(
    family_history: &[&FeedbackRecord],
    family: &Family<'_>,
    base_level: u8,
    config: &PlannerConfig,
) -> u8 {
    let Some(latest) = family_history.last() else {
        return base_level;
    };
    let current = family.level_of(latest.drill_id).unwrap_or(base_level);
    let up = current.saturating_add(1).min(config.max_level);

    match latest.rating {
        Some(Rating::Easy) => up,
        Some(Rating::CouldNotDo) => current.saturating_sub(1).max(1),
        Some(Rating::Challenging) => {
            let challenging = family_history
                .iter()
                .filter(|f| f.rating == Some(Rating::Challenging))
                .count();
            if challenging >= config.challenging_level_up_count {
                up
            } else {
                current
            }
        }
        None => current,
    }
}

/// Pick the drill to present from `candidates`.
///
/// Feedback is matched against the *whole* family (so the drill practised
/// last session still counts even when it is excluded as recent). The result
/// is, in order of preference:
///
/// 1. the candidate at the target level
/// 2. the family's target-level drill, recent or not, once the family has
///    feedback
/// 3. the lowest-level candidate
pub fn resolve_drill<'a>(
    catalog: &'a Catalog,
    candidates: &Family<'a>,
    history: &[FeedbackRecord],
    config: &PlannerConfig,
) -> &'a Drill {
    let full = catalog.family_of(candidates.first().id);
    let full = full.as_ref().unwrap_or(candidates);

    let fam_history = family_feedback(history, full);
    let target = next_level(&fam_history, full, candidates.base_level(), config);
    let drill = candidates
        .at_level(target)
        .or_else(|| {
            if fam_history.is_empty() {
                None
            } else {
                full.at_level(target)
            }
        })
        .unwrap_or_else(|| candidates.first());

    debug!(
        family = candidates.family_id,
        feedback = fam_history.len(),
        target,
        chosen_level = drill.level,
        "Resolved family level"
    );
    drill
}
