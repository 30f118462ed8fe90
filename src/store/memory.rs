//! In-memory training store
//!
//! Not durable. Data is lost on restart.

use std::collections::HashMap;

use tracing::{debug, info};

use super::{StoreError, StoreStats, TrainingStore};
use crate::config::defaults::MAX_SESSIONS_PER_CHILD;
use crate::types::{DrillId, FeedbackRecord, SessionRecord, ShowcaseEntry};

/// In-memory store for the service and for tests
pub struct InMemoryStore {
    feedback: Vec<FeedbackRecord>,
    next_sequence: u64,
    recent: HashMap<String, Vec<DrillId>>,
    sessions: HashMap<String, Vec<SessionRecord>>,
    next_session_id: u64,
    showcase: HashMap<String, Vec<ShowcaseEntry>>,
    max_sessions_per_child: usize,
}

impl InMemoryStore {
    /// Create a new in-memory store with default limits
    pub fn new() -> Self {
        Self::with_session_limit(MAX_SESSIONS_PER_CHILD)
    }

    /// Create a store that keeps at most `max_sessions_per_child` sessions for each child.
    ///
    /// The newest session of a child is never evicted.
    pub fn with_session_limit(max_sessions_per_child: usize) -> Self {
        Self {
            feedback: Vec::new(),
            next_sequence: 1,
            recent: HashMap::new(),
            sessions: HashMap::new(),
            next_session_id: 1,
            showcase: HashMap::new(),
            max_sessions_per_child: max_sessions_per_child.max(1),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingStore for InMemoryStore {
    fn append_feedback(&mut self, mut record: FeedbackRecord) -> Result<u64, StoreError> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        record.sequence = sequence;
        self.feedback.push(record);
        Ok(sequence)
    }

    fn feedback_for_child(&self, child_id: &str) -> Result<Vec<FeedbackRecord>, StoreError> {
        Ok(self
            .feedback
            .iter()
            .filter(|f| f.child_id == child_id)
            .cloned()
            .collect())
    }

    fn remove_last_feedback(
        &mut self,
        child_id: &str,
    ) -> Result<Option<FeedbackRecord>, StoreError> {
        let pos = self.feedback.iter().rposition(|f| f.child_id == child_id);
        Ok(pos.map(|i| self.feedback.remove(i)))
    }

    fn recent_drills(&self, child_id: &str) -> Result<Vec<DrillId>, StoreError> {
        Ok(self.recent.get(child_id).cloned().unwrap_or_default())
    }

    fn set_recent_drills(
        &mut self,
        child_id: &str,
        drill_ids: Vec<DrillId>,
    ) -> Result<(), StoreError> {
        self.recent.insert(child_id.to_string(), drill_ids);
        Ok(())
    }

    fn allocate_session_id(&mut self) -> u64 {
        let id = self.next_session_id;
        self.next_session_id += 1;
        id
    }

    fn record_session(&mut self, session: SessionRecord) -> Result<(), StoreError> {
        let child_id = session.child_id.clone();
        let log = self.sessions.entry(child_id.clone()).or_default();
        log.push(session);

        // Evict this child's oldest if over limit
        if log.len() > self.max_sessions_per_child {
            let excess = log.len() - self.max_sessions_per_child;
            log.drain(..excess);
            debug!(child_id = %child_id, evicted = excess, "Session log trimmed");
        }
        Ok(())
    }

    fn update_session(&mut self, session: SessionRecord) -> Result<(), StoreError> {
        let slot = self
            .sessions
            .get_mut(&session.child_id)
            .and_then(|log| log.iter_mut().find(|s| s.session_id == session.session_id))
            .ok_or(StoreError::SessionNotFound(session.session_id))?;
        *slot = session;
        Ok(())
    }

    fn latest_session(&self, child_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self
            .sessions
            .get(child_id)
            .and_then(|log| log.last())
            .cloned())
    }

    fn showcase(&self, child_id: &str) -> Result<Vec<ShowcaseEntry>, StoreError> {
        Ok(self.showcase.get(child_id).cloned().unwrap_or_default())
    }

    fn upsert_showcase(&mut self, child_id: &str, entry: ShowcaseEntry) -> Result<(), StoreError> {
        let entries = self.showcase.entry(child_id.to_string()).or_default();
        match entries.iter_mut().find(|e| e.family_id == entry.family_id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        Ok(())
    }

    fn remove_showcase(
        &mut self,
        child_id: &str,
        family_id: &str,
    ) -> Result<Option<ShowcaseEntry>, StoreError> {
        let Some(entries) = self.showcase.get_mut(child_id) else {
            return Ok(None);
        };
        let pos = entries.iter().position(|e| e.family_id == family_id);
        Ok(pos.map(|i| entries.remove(i)))
    }

    fn reset(&mut self) {
        let limit = self.max_sessions_per_child;
        *self = Self::with_session_limit(limit);
        info!("Training store reset - all data cleared");
    }

    fn stats(&self) -> StoreStats {
        let mut children: std::collections::HashSet<&str> = self
            .feedback
            .iter()
            .map(|f| f.child_id.as_str())
            .collect();
        children.extend(self.sessions.keys().map(String::as_str));
        StoreStats {
            children: children.len(),
            feedback_records: self.feedback.len(),
            sessions: self.sessions.values().map(Vec::len).sum(),
        }
    }

    fn backend_name(&self) -> &'static str {
        "InMemory"
    }
}
