//! Session history: the child's feedback grouped by UTC day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::error::{require_child_id, CoachError};
use crate::store::TrainingStore;
use crate::types::{HistoryDay, HistoryEntry};

const UNKNOWN_DRILL_TITLE: &str = "Unknown drill";

/// Feedback grouped by day, newest day first; entries keep submission order.
pub fn session_history(
    store: &dyn TrainingStore,
    catalog: &Catalog,
    child_id: &str,
) -> Result<Vec<HistoryDay>, CoachError> {
    let child_id = require_child_id(child_id)?;

    let mut days: BTreeMap<NaiveDate, Vec<HistoryEntry>> = BTreeMap::new();
    for record in store.feedback_for_child(child_id)? {
        let drill = catalog.get(record.drill_id);
        days.entry(record.recorded_at.date_naive())
            .or_default()
            .push(HistoryEntry {
                drill_id: record.drill_id,
                title: drill.map_or_else(|| UNKNOWN_DRILL_TITLE.to_string(), |d| d.title.clone()),
                family_id: drill.map(|d| d.family.clone()),
                level: drill.map(|d| d.level),
                rating: record.rating,
                next_action: record.next_action,
                attempted: record.attempted,
                skipped: !record.attempted,
                mode: record.mode,
                recorded_at: record.recorded_at,
            });
    }

    Ok(days
        .into_iter()
        .rev()
        .map(|(date, drills)| HistoryDay { date, drills })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeedbackIn, FeedbackRecord, Rating};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_grouped_newest_day_first() {
        let mut store = crate::store::InMemoryStore::new();
        let catalog = Catalog::builtin();
        let day1 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();

        for (drill, when) in [(1, day1), (4, day2), (999, day2)] {
            store
                .append_feedback(FeedbackRecord::from_input(
                    FeedbackIn::rated("ava", drill, Rating::Easy),
                    when,
                ))
                .unwrap();
        }
        store
            .append_feedback(FeedbackRecord::from_input(FeedbackIn::skipped("ava", 7), day1))
            .unwrap();

        let history = session_history(&store, &catalog, "ava").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, day2.date_naive());
        assert_eq!(history[0].drills.len(), 2);
        assert_eq!(history[0].drills[1].title, "Unknown drill");
        assert!(history[0].drills[1].family_id.is_none());

        assert_eq!(history[1].drills[0].title, "Toe Taps");
        assert!(history[1].drills[1].skipped);
        assert!(history[1].drills[1].rating.is_none());
    }

    #[test]
    fn test_empty_history() {
        let store = crate::store::InMemoryStore::new();
        assert!(session_history(&store, &Catalog::builtin(), "ava")
            .unwrap()
            .is_empty());
    }
}
