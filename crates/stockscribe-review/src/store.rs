//! Arena of open review sessions keyed by id

use crate::error::ReviewError;
use crate::session::ReviewSession;
use std::collections::HashMap;
use stockscribe_domain::{ResolvedItem, ReviewThreshold, SessionId};
use tracing::debug;

/// Owns every open [`ReviewSession`]
///
/// Callers hold a [`SessionId`] and go through the store for each
/// operation. Finalizing hands the items off and drops the session.
/// There is no locking: whoever embeds the store serializes access.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, ReviewSession>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session and return its id
    pub fn open(
        &mut self,
        location: impl Into<String>,
        period: impl Into<String>,
        threshold: ReviewThreshold,
    ) -> SessionId {
        let session = ReviewSession::new(location, period, threshold);
        let id = session.session_id();
        debug!("Opened review session {} for '{}'", id, session.location());
        self.sessions.insert(id, session);
        id
    }

    /// Borrow a session
    pub fn get(&self, id: SessionId) -> Result<&ReviewSession, ReviewError> {
        self.sessions.get(&id).ok_or(ReviewError::SessionNotFound(id))
    }

    /// Borrow a session mutably
    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut ReviewSession, ReviewError> {
        self.sessions
            .get_mut(&id)
            .ok_or(ReviewError::SessionNotFound(id))
    }

    /// Finalize a session and remove it from the store
    pub fn finalize(&mut self, id: SessionId) -> Result<Vec<ResolvedItem>, ReviewError> {
        let items = self.get_mut(id)?.finalize()?;
        self.sessions.remove(&id);
        Ok(items)
    }

    /// Drop a session without handing anything off
    pub fn discard(&mut self, id: SessionId) -> Result<ReviewSession, ReviewError> {
        let session = self
            .sessions
            .remove(&id)
            .ok_or(ReviewError::SessionNotFound(id))?;
        debug!("Discarded review session {}", id);
        Ok(session)
    }

    /// Ids of all open sessions, oldest first
    pub fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Number of open sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no open sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscribe_domain::Unit;

    fn wine() -> ResolvedItem {
        ResolvedItem::new(
            Some("p-wine".into()),
            "Wine",
            6.0,
            Unit::Bottle,
            1.0,
            "6 wine",
            ReviewThreshold::default(),
        )
    }

    #[test]
    fn test_open_and_get() {
        let mut store = SessionStore::new();
        let id = store.open("bar", "2026-10", ReviewThreshold::default());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().location(), "bar");
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut store = SessionStore::new();
        let a = store.open("bar", "2026-10", ReviewThreshold::default());
        let b = store.open("cellar", "2026-10", ReviewThreshold::default());
        assert_ne!(a, b);

        store.get_mut(a).unwrap().add_item(wine()).unwrap();
        assert_eq!(store.get(a).unwrap().len(), 1);
        assert!(store.get(b).unwrap().is_empty());
    }

    #[test]
    fn test_finalize_hands_off_and_removes() {
        let mut store = SessionStore::new();
        let id = store.open("bar", "2026-10", ReviewThreshold::default());
        store.get_mut(id).unwrap().add_item(wine()).unwrap();

        let items = store.finalize(id).unwrap();
        assert_eq!(items.len(), 1);
        assert!(store.is_empty());
        assert_eq!(store.finalize(id).unwrap_err(), ReviewError::SessionNotFound(id));
    }

    #[test]
    fn test_unknown_id() {
        let mut store = SessionStore::new();
        let id = SessionId::new();
        assert_eq!(store.get(id).unwrap_err(), ReviewError::SessionNotFound(id));
        assert!(store.get_mut(id).is_err());
        assert!(store.discard(id).is_err());
    }

    #[test]
    fn test_discard() {
        let mut store = SessionStore::new();
        let id = store.open("bar", "2026-10", ReviewThreshold::default());
        let session = store.discard(id).unwrap();
        assert_eq!(session.session_id(), id);
        assert!(store.ids().is_empty());
    }
}
