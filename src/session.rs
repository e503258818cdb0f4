//! Session-scoped drug selection state.
//!
//! The clinician's "currently chosen drugs" live in an explicit session
//! object keyed by UUID, passed into the core per request — never
//! process-global state. Sessions hold plain data; all mutation goes
//! through the store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::turkish;

/// One clinician's drug selection.
pub struct SelectionSession {
    id: Uuid,
    selected: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SelectionSession {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            selected: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Replace the selection. Order is preserved; duplicate names
    /// (case-insensitively, Turkish fold) keep their first occurrence.
    fn set_selection(&mut self, drugs: Vec<String>) {
        let mut seen = std::collections::HashSet::new();
        self.selected = drugs
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .filter(|d| seen.insert(turkish::fold(d)))
            .collect();
        self.updated_at = Utc::now();
    }
}

/// Errors from selection-store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),
}

/// All live selection sessions.
pub struct SelectionStore {
    sessions: HashMap<Uuid, SelectionSession>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Create an empty session and return its id.
    pub fn create(&mut self) -> Uuid {
        let session = SelectionSession::new();
        let id = session.id;
        self.sessions.insert(id, session);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&SelectionSession> {
        self.sessions.get(id)
    }

    /// Replace a session's selection.
    pub fn set_selection(&mut self, id: &Uuid, drugs: Vec<String>) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or(SessionError::NotFound(*id))?;
        session.set_selection(drugs);
        Ok(())
    }

    /// Drop a session.
    pub fn evict(&mut self, id: &Uuid) {
        self.sessions.remove(id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}
