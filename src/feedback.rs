//! Feedback ingestion and undo
//!
//! Feedback is append-only. The only removal path is [`undo_last`], which
//! drops the child's newest record while it is younger than the undo window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::{FeedbackConfig, PlannerConfig};
use crate::error::{require_child_id, CoachError};
use crate::store::TrainingStore;
use crate::types::{
    FeedbackIn, FeedbackRecord, NextAction, ShowcaseEntry, FEEDBACK_SCHEMA_VERSION,
};

/// Acknowledgement for a stored feedback record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackReceipt {
    pub ok: bool,
    pub sequence: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UndoOutcome {
    pub ok: bool,
}

/// Validate and append one feedback record.
///
/// `level_up` and `add_to_showcase` also put the drill's family in the
/// child's showcase.
pub fn submit_feedback(
    store: &mut dyn TrainingStore,
    catalog: &Catalog,
    config: &PlannerConfig,
    mut input: FeedbackIn,
    now: DateTime<Utc>,
) -> Result<FeedbackReceipt, CoachError> {
    if input.schema_version != FEEDBACK_SCHEMA_VERSION {
        return Err(CoachError::UnsupportedSchemaVersion {
            found: input.schema_version,
            expected: FEEDBACK_SCHEMA_VERSION,
        });
    }
    input.child_id = require_child_id(&input.child_id)?.to_string();
    let drill = catalog
        .get(input.drill_id)
        .ok_or(CoachError::UnknownDrill(input.drill_id))?;

    let mut record = FeedbackRecord::from_input(input, now);

    if let Some(action) = record.next_action.filter(NextAction::adds_to_showcase) {
        let level = match action {
            NextAction::LevelUp => drill.level.saturating_add(1).min(config.max_level),
            _ => drill.level,
        };
        let already_shown = store
            .showcase(&record.child_id)?
            .iter()
            .any(|e| e.family_id == drill.family);
        store.upsert_showcase(
            &record.child_id,
            ShowcaseEntry {
                family_id: drill.family.clone(),
                level,
                added_at: now,
            },
        )?;
        record.added_to_showcase = !already_shown;
    }

    let child_id = record.child_id.clone();
    let rating = record.rating;
    let sequence = store.append_feedback(record)?;

    debug!(
        child_id = %child_id,
        drill_id = drill.id,
        rating = ?rating,
        sequence,
        "Feedback recorded"
    );
    Ok(FeedbackReceipt { ok: true, sequence })
}

/// Remove the child's newest feedback if it is still inside the undo window.
pub fn undo_last(
    store: &mut dyn TrainingStore,
    catalog: &Catalog,
    config: &FeedbackConfig,
    child_id: &str,
    now: DateTime<Utc>,
) -> Result<UndoOutcome, CoachError> {
    let child_id = require_child_id(child_id)?;
    let Some(latest) = store.feedback_for_child(child_id)?.pop() else {
        return Ok(UndoOutcome { ok: false });
    };

    // A record stamped after `now` counts as just submitted.
    let elapsed = now
        .signed_duration_since(latest.recorded_at)
        .to_std()
        .unwrap_or_default();
    if elapsed > std::time::Duration::from_secs(config.undo_window_secs) {
        debug!(child_id = %child_id, sequence = latest.sequence, "Undo window elapsed");
        return Ok(UndoOutcome { ok: false });
    }

    let Some(removed) = store.remove_last_feedback(child_id)? else {
        return Ok(UndoOutcome { ok: false });
    };
    if removed.added_to_showcase {
        if let Some(drill) = catalog.get(removed.drill_id) {
            store.remove_showcase(child_id, &drill.family)?;
        }
    }

    info!(
        child_id = %child_id,
        sequence = removed.sequence,
        drill_id = removed.drill_id,
        "Feedback undone"
    );
    Ok(UndoOutcome { ok: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::types::Rating;
    use chrono::Duration;

    fn submit(store: &mut InMemoryStore, input: FeedbackIn, now: DateTime<Utc>) -> FeedbackReceipt {
        submit_feedback(store, &Catalog::builtin(), &PlannerConfig::default(), input, now).unwrap()
    }

    #[test]
    fn test_submit_assigns_sequence() {
        let mut store = InMemoryStore::new();
        let now = Utc::now();
        let first = submit(&mut store, FeedbackIn::rated("ava", 1, Rating::Easy), now);
        let second = submit(&mut store, FeedbackIn::rated("ava", 4, Rating::Challenging), now);
        assert!(first.ok);
        assert!(second.sequence > first.sequence);
        assert_eq!(store.feedback_for_child("ava").unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_drill_rejected() {
        let mut store = InMemoryStore::new();
        let err = submit_feedback(
            &mut store,
            &Catalog::builtin(),
            &PlannerConfig::default(),
            FeedbackIn::rated("ava", 999, Rating::Easy),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, CoachError::UnknownDrill(999)));
        assert!(store.feedback_for_child("ava").unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_schema_rejected() {
        let mut store = InMemoryStore::new();
        let mut input = FeedbackIn::rated("ava", 1, Rating::Easy);
        input.schema_version = 2;
        let err = submit_feedback(
            &mut store,
            &Catalog::builtin(),
            &PlannerConfig::default(),
            input,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoachError::UnsupportedSchemaVersion { found: 2, expected: 1 }
        ));
    }

    #[test]
    fn test_level_up_adds_next_level_to_showcase() {
        let mut store = InMemoryStore::new();
        let input = FeedbackIn::rated("ava", 2, Rating::Easy).with_next_action(NextAction::LevelUp);
        submit(&mut store, input, Utc::now());

        let showcase = store.showcase("ava").unwrap();
        assert_eq!(showcase.len(), 1);
        assert_eq!(showcase[0].family_id, "Toe Taps");
        assert_eq!(showcase[0].level, 3);
    }

    #[test]
    fn test_add_to_showcase_keeps_drill_level() {
        let mut store = InMemoryStore::new();
        let input =
            FeedbackIn::rated("ava", 17, Rating::Easy).with_next_action(NextAction::AddToShowcase);
        submit(&mut store, input, Utc::now());
        assert_eq!(store.showcase("ava").unwrap()[0].level, 2);
    }

    #[test]
    fn test_undo_within_window_reverts_showcase() {
        let mut store = InMemoryStore::new();
        let catalog = Catalog::builtin();
        let now = Utc::now();
        submit(&mut store, FeedbackIn::rated("ava", 1, Rating::Easy), now);
        let input = FeedbackIn::rated("ava", 2, Rating::Easy).with_next_action(NextAction::LevelUp);
        submit(&mut store, input, now);

        let outcome = undo_last(
            &mut store,
            &catalog,
            &FeedbackConfig::default(),
            "ava",
            now + Duration::seconds(2),
        )
        .unwrap();
        assert!(outcome.ok);
        let remaining = store.feedback_for_child("ava").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].drill_id, 1);
        assert!(store.showcase("ava").unwrap().is_empty());
    }

    #[test]
    fn test_undo_after_window_is_noop() {
        let mut store = InMemoryStore::new();
        let catalog = Catalog::builtin();
        let now = Utc::now();
        submit(&mut store, FeedbackIn::rated("ava", 1, Rating::Easy), now);

        let outcome = undo_last(
            &mut store,
            &catalog,
            &FeedbackConfig::default(),
            "ava",
            now + Duration::seconds(6),
        )
        .unwrap();
        assert!(!outcome.ok);
        assert_eq!(store.feedback_for_child("ava").unwrap().len(), 1);
    }

    #[test]
    fn test_undo_without_feedback() {
        let mut store = InMemoryStore::new();
        let outcome = undo_last(
            &mut store,
            &Catalog::builtin(),
            &FeedbackConfig::default(),
            "ava",
            Utc::now(),
        )
        .unwrap();
        assert!(!outcome.ok);
    }
}
