//! Parent summary
//!
//! Aggregates computed from the feedback log on every request; nothing here
//! is cached or stored. Days are UTC calendar days.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::catalog::Catalog;
use crate::config::{PlannerConfig, SummaryConfig};
use crate::error::{require_child_id, CoachError};
use crate::planner::{family_feedback, next_level};
use crate::showcase::list_showcase;
use crate::store::TrainingStore;
use crate::types::{
    EffortMix, FamilyKey, FamilyProgress, FeedbackRecord, ParentSummary, ProgressDelta, Rating,
    StuckSignal,
};

/// Build the parent dashboard for one child.
pub fn parent_summary(
    store: &dyn TrainingStore,
    catalog: &Catalog,
    planner: &PlannerConfig,
    config: &SummaryConfig,
    child_id: &str,
    now: DateTime<Utc>,
) -> Result<ParentSummary, CoachError> {
    let child_id = require_child_id(child_id)?;
    let history = store.feedback_for_child(child_id)?;

    let today = now.date_naive();
    let window_start = today
        .checked_sub_days(Days::new(u64::from(config.window_days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    let in_window: Vec<&FeedbackRecord> = history
        .iter()
        .filter(|f| {
            let day = f.recorded_at.date_naive();
            day >= window_start && day <= today
        })
        .collect();

    let window_days: BTreeSet<NaiveDate> =
        in_window.iter().map(|f| f.recorded_at.date_naive()).collect();
    let session_dates: Vec<NaiveDate> = window_days.iter().rev().copied().collect();

    Ok(ParentSummary {
        child_id: child_id.to_string(),
        sessions_this_week: session_dates.len(),
        session_dates,
        current_streak_days: streak_days(&history, today),
        progress: family_progress(catalog, planner, &history, &in_window),
        effort_mix: effort_mix(&history),
        stuck_signals: stuck_signals(catalog, &history, config.stuck_threshold),
        showcase: list_showcase(store, catalog, child_id)?,
    })
}

/// Consecutive feedback days ending today, or yesterday if nothing is logged today yet.
fn streak_days(history: &[FeedbackRecord], today: NaiveDate) -> usize {
    let days: HashSet<NaiveDate> = history.iter().map(|f| f.recorded_at.date_naive()).collect();

    let mut day = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };
    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

fn effort_mix(history: &[FeedbackRecord]) -> EffortMix {
    history
        .iter()
        .fold(EffortMix::default(), |mut mix, f| {
            match f.rating {
                Some(Rating::CouldNotDo) => mix.could_not_do += 1,
                Some(Rating::Challenging) => mix.challenging += 1,
                Some(Rating::Easy) => mix.easy += 1,
                None => {}
            }
            mix
        })
}

/// Family keys in the order their first feedback appears.
fn families_seen<'r>(
    catalog: &Catalog,
    records: impl IntoIterator<Item = &'r FeedbackRecord>,
) -> Vec<FamilyKey> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|f| catalog.get(f.drill_id))
        .map(|d| d.family_key())
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Level movement per family practised in the window: the level of the
/// first drill in the window versus the projected next level.
fn family_progress(
    catalog: &Catalog,
    planner: &PlannerConfig,
    history: &[FeedbackRecord],
    in_window: &[&FeedbackRecord],
) -> Vec<FamilyProgress> {
    families_seen(catalog, in_window.iter().copied())
        .into_iter()
        .filter_map(|key| {
            let family = catalog.family(&key)?;
            let from_level = in_window
                .iter()
                .find_map(|f| family.level_of(f.drill_id))?;
            let to_level = next_level(
                &family_feedback(history, &family),
                &family,
                family.base_level(),
                planner,
            );
            let delta = match to_level.cmp(&from_level) {
                std::cmp::Ordering::Greater => ProgressDelta::Up,
                std::cmp::Ordering::Equal => ProgressDelta::Same,
                std::cmp::Ordering::Less => ProgressDelta::Down,
            };
            Some(FamilyProgress {
                family_id: family.family_id.to_string(),
                delta,
                from_level,
                to_level,
            })
        })
        .collect()
}

/// Families whose latest ratings are a run of at least `threshold` could-not-do.
///
/// Skipped drills carry no rating and neither extend nor break the run.
fn stuck_signals(
    catalog: &Catalog,
    history: &[FeedbackRecord],
    threshold: usize,
) -> Vec<StuckSignal> {
    families_seen(catalog, history)
        .into_iter()
        .filter_map(|key| {
            let family = catalog.family(&key)?;
            let run = family_feedback(history, &family)
                .iter()
                .rev()
                .filter_map(|f| f.rating)
                .take_while(|r| *r == Rating::CouldNotDo)
                .count();
            (run >= threshold).then(|| StuckSignal {
                family_id: family.family_id.to_string(),
                consecutive_could_not_do: run,
            })
        })
        .collect()
}
