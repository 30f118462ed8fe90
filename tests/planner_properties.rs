//! Planner Property Tests
//!
//! Session-level guarantees checked through the public library API:
//! family uniqueness, level progression across sessions, recent-drill
//! exclusion and the empty-session outcome.

use chrono::Utc;
use std::collections::HashSet;

use drill_coach::config::PlannerConfig;
use drill_coach::feedback::submit_feedback;
use drill_coach::types::{Drill, DrillId, Equipment, FeedbackIn, Rating, Session};
use drill_coach::{plan_session, Catalog, InMemoryStore, SessionRequest, TrainingStore};

fn drill(id: DrillId, title: &str, level: u8, equipment: Equipment) -> Drill {
    Drill {
        id,
        title: title.to_string(),
        family: title.to_string(),
        skill: "ball_control".to_string(),
        level,
        equipment,
        instructions: format!("{title} level {level}"),
        video_url: None,
        why_it_matters: None,
    }
}

/// Three families with levels 1-3 each, all ball-only.
fn three_family_catalog() -> Catalog {
    let mut drills = Vec::new();
    let mut id = 1;
    for title in ["Toe Taps", "Wall Passes", "Cone Slalom"] {
        for level in 1..=3 {
            drills.push(drill(id, title, level, Equipment::BallOnly));
            id += 1;
        }
    }
    Catalog::from_drills(drills).unwrap()
}

fn plan(store: &mut InMemoryStore, catalog: &Catalog, request: &SessionRequest) -> Session {
    plan_session(store, catalog, &PlannerConfig::default(), request, Utc::now()).unwrap()
}

fn rate(store: &mut InMemoryStore, catalog: &Catalog, drill_id: DrillId, rating: Rating) {
    submit_feedback(
        store,
        catalog,
        &PlannerConfig::default(),
        FeedbackIn::rated("ava", drill_id, rating),
        Utc::now(),
    )
    .unwrap();
}

fn level_of(session: &Session, family: &str) -> Option<u8> {
    session
        .drills
        .iter()
        .find(|d| d.family_id == family)
        .map(|d| d.level)
}

// ============================================================================
// Shape
// ============================================================================

#[test]
fn sessions_never_repeat_a_family() {
    let catalog = Catalog::builtin();
    for equipment in Equipment::ALL {
        let mut store = InMemoryStore::new();
        let request = SessionRequest::new("ava", equipment);
        for _ in 0..5 {
            let session = plan(&mut store, &catalog, &request);
            assert!(session.drills.len() <= 3);
            let families: HashSet<&str> =
                session.drills.iter().map(|d| d.family_id.as_str()).collect();
            assert_eq!(families.len(), session.drills.len(), "{equipment}: {session:?}");
        }
    }
}

#[test]
fn fresh_child_gets_base_levels_in_catalog_order() {
    let catalog = three_family_catalog();
    let mut store = InMemoryStore::new();
    let session = plan(&mut store, &catalog, &SessionRequest::new("ava", Equipment::BallOnly));

    let families: Vec<&str> = session.drills.iter().map(|d| d.family_id.as_str()).collect();
    assert_eq!(families, vec!["Toe Taps", "Wall Passes", "Cone Slalom"]);
    assert_eq!(session.levels(), vec![1, 1, 1]);
}

#[test]
fn no_matching_equipment_is_nothing_to_train() {
    let catalog = three_family_catalog();
    let mut store = InMemoryStore::new();
    let session = plan(&mut store, &catalog, &SessionRequest::new("ava", Equipment::BallCones));
    assert!(session.is_empty());
    assert!(session.nothing_to_train);
    assert!(store.recent_drills("ava").unwrap().is_empty());
}

// ============================================================================
// Progression
// ============================================================================

#[test]
fn easy_moves_family_up_one_level() {
    let catalog = three_family_catalog();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly).ignoring_recent();
    plan(&mut store, &catalog, &request);

    rate(&mut store, &catalog, 1, Rating::Easy);
    let next = plan(&mut store, &catalog, &request);
    assert_eq!(level_of(&next, "Toe Taps"), Some(2));
    assert_eq!(level_of(&next, "Wall Passes"), Some(1));
}

#[test]
fn could_not_do_moves_down_and_floors_at_one() {
    let catalog = three_family_catalog();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly).ignoring_recent();

    rate(&mut store, &catalog, 3, Rating::CouldNotDo);
    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Toe Taps"), Some(2));

    rate(&mut store, &catalog, 1, Rating::CouldNotDo);
    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Toe Taps"), Some(1));
}

#[test]
fn second_challenging_levels_up_on_third_selection() {
    let catalog = three_family_catalog();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly).ignoring_recent();

    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Wall Passes"), Some(1));
    rate(&mut store, &catalog, 4, Rating::Challenging);
    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Wall Passes"), Some(1));
    rate(&mut store, &catalog, 4, Rating::Challenging);
    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Wall Passes"), Some(2));
}

#[test]
fn levels_never_exceed_max_level() {
    let catalog = three_family_catalog();
    let mut store = InMemoryStore::new();
    let config = PlannerConfig {
        max_level: 2,
        ..PlannerConfig::default()
    };
    let request = SessionRequest::new("ava", Equipment::BallOnly).ignoring_recent();

    rate(&mut store, &catalog, 2, Rating::Easy);
    let session = plan_session(&mut store, &catalog, &config, &request, Utc::now()).unwrap();
    assert_eq!(level_of(&session, "Toe Taps"), Some(2));
}

#[test]
fn could_not_do_on_base_level_holds_without_ignore_recent() {
    let catalog = Catalog::builtin();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly);

    let first = plan(&mut store, &catalog, &request);
    assert_eq!(level_of(&first, "Toe Taps"), Some(1));
    rate(&mut store, &catalog, 1, Rating::CouldNotDo);

    let next = plan(&mut store, &catalog, &request);
    assert_eq!(level_of(&next, "Toe Taps"), Some(1));
}

#[test]
fn challenging_progression_without_ignore_recent() {
    let catalog = Catalog::builtin();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly);

    plan(&mut store, &catalog, &request);
    rate(&mut store, &catalog, 1, Rating::Easy);
    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Toe Taps"), Some(2));

    // Single challenging holds, even though level 2 was just practised.
    rate(&mut store, &catalog, 2, Rating::Challenging);
    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Toe Taps"), Some(2));

    rate(&mut store, &catalog, 2, Rating::Challenging);
    assert_eq!(level_of(&plan(&mut store, &catalog, &request), "Toe Taps"), Some(3));
}

#[test]
fn could_not_do_moves_down_without_ignore_recent() {
    let catalog = Catalog::builtin();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly);

    plan(&mut store, &catalog, &request);
    rate(&mut store, &catalog, 1, Rating::Easy);
    plan(&mut store, &catalog, &request);
    rate(&mut store, &catalog, 2, Rating::CouldNotDo);

    let next = plan(&mut store, &catalog, &request);
    assert_eq!(level_of(&next, "Toe Taps"), Some(1));
}

// ============================================================================
// Recent Drills
// ============================================================================

#[test]
fn recent_drills_excluded_when_alternatives_exist() {
    let catalog = Catalog::builtin();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly);

    let first = plan(&mut store, &catalog, &request);
    let second = plan(&mut store, &catalog, &request);
    let first_ids: HashSet<DrillId> = first.drills.iter().map(|d| d.id).collect();
    assert!(second.drills.iter().all(|d| !first_ids.contains(&d.id)));
    assert_eq!(second.drills.len(), 3);
}

#[test]
fn ignore_recent_allows_repeats() {
    let catalog = Catalog::builtin();
    let mut store = InMemoryStore::new();
    let request = SessionRequest::new("ava", Equipment::BallOnly).ignoring_recent();

    let first = plan(&mut store, &catalog, &request);
    let second = plan(&mut store, &catalog, &request);
    assert_eq!(first.drills, second.drills);
}

#[test]
fn children_are_tracked_independently() {
    let catalog = Catalog::builtin();
    let mut store = InMemoryStore::new();
    plan(&mut store, &catalog, &SessionRequest::new("ava", Equipment::BallOnly));

    let other = plan(&mut store, &catalog, &SessionRequest::new("ben", Equipment::BallOnly));
    let ids: Vec<DrillId> = other.drills.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 4, 7]);
}
