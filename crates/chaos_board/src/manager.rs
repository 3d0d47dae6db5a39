//! Ownership of all sessions and of which one is active.

use crate::session::is_valid_session_id;
use crate::{CommandKind, GameError, Grid, Session, is_command_available};
use tracing::{debug, info, instrument, warn};

/// Manages all game sessions of one console.
///
/// Sessions are kept in creation order. At most one is active; gameplay
/// commands act on it.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Vec<Session>,
    active: Option<String>,
}

impl SessionManager {
    /// Creates an empty session manager.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating session manager");
        Self::default()
    }

    /// Creates a session, appends it and makes it active.
    ///
    /// # Errors
    ///
    /// - [`GameError::DuplicateId`] if `id` is taken.
    /// - [`GameError::NotAlphanumericId`] if `id` is not alphanumeric.
    /// - Any error from [`Session::create`].
    #[instrument(skip(self, grid), fields(session_id = %id))]
    pub fn create_session(
        &mut self,
        id: &str,
        map_label: &str,
        grid: Grid,
        player_count: usize,
        seed: Option<u64>,
    ) -> Result<&Session, GameError> {
        if self.find(id).is_some() {
            warn!("Session already exists");
            return Err(GameError::DuplicateId);
        }
        if !is_valid_session_id(id) {
            warn!("Session id is not alphanumeric");
            return Err(GameError::NotAlphanumericId);
        }

        let session = Session::create(id, map_label, grid, player_count, seed)?;
        self.sessions.push(session);
        self.active = Some(id.to_string());
        info!(count = self.sessions.len(), "Session added and activated");
        self.active().ok_or(GameError::UnknownSession)
    }

    /// Removes a session. Removing the active one leaves none active.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownSession`] if no session has this id.
    #[instrument(skip(self))]
    pub fn delete_session(&mut self, id: &str) -> Result<Session, GameError> {
        let index = self.index_of(id).ok_or_else(|| {
            warn!("Session not found");
            GameError::UnknownSession
        })?;
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        let removed = self.sessions.remove(index);
        info!(count = self.sessions.len(), "Session deleted");
        Ok(removed)
    }

    /// Makes another session active.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownSession`] for an unknown id,
    /// [`GameError::AlreadyActive`] if it is active already.
    #[instrument(skip(self))]
    pub fn switch_session(&mut self, id: &str) -> Result<&Session, GameError> {
        if self.index_of(id).is_none() {
            warn!("Session not found");
            return Err(GameError::UnknownSession);
        }
        if self.active.as_deref() == Some(id) {
            warn!("Session is already active");
            return Err(GameError::AlreadyActive);
        }
        self.active = Some(id.to_string());
        info!("Session activated");
        self.active().ok_or(GameError::UnknownSession)
    }

    /// Looks up a session by id.
    pub fn find(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id() == id)
    }

    /// All sessions in creation order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Id of the active session.
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// True if `id` names the active session.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// The active session.
    pub fn active(&self) -> Option<&Session> {
        self.active.as_deref().and_then(|id| self.find(id))
    }

    /// The active session, mutably.
    pub fn active_mut(&mut self) -> Option<&mut Session> {
        let id = self.active.as_deref()?;
        self.sessions.iter_mut().find(|session| session.id() == id)
    }

    /// Decides whether `kind` may run right now.
    pub fn is_available(&self, kind: CommandKind) -> bool {
        is_command_available(kind, self.active(), &self.sessions)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.sessions.iter().position(|session| session.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_rows(&["aPPT", "bPPP"]).expect("valid map")
    }

    #[test]
    fn test_create_activates() {
        let mut manager = SessionManager::new();
        manager
            .create_session("one", "map.txt", grid(), 2, None)
            .expect("created");
        assert_eq!(manager.active_id(), Some("one"));
        assert_eq!(manager.sessions().len(), 1);
    }

    #[test]
    fn test_create_rejects_bad_ids() {
        let mut manager = SessionManager::new();
        manager
            .create_session("one", "map.txt", grid(), 2, None)
            .expect("created");
        assert_eq!(
            manager.create_session("one", "map.txt", grid(), 2, None).err(),
            Some(GameError::DuplicateId)
        );
        assert_eq!(
            manager.create_session("no-way", "map.txt", grid(), 2, None).err(),
            Some(GameError::NotAlphanumericId)
        );
        assert_eq!(manager.sessions().len(), 1);
    }

    #[test]
    fn test_switch_and_delete() {
        let mut manager = SessionManager::new();
        manager.create_session("one", "m", grid(), 2, None).expect("created");
        manager.create_session("two", "m", grid(), 2, None).expect("created");
        assert_eq!(manager.active_id(), Some("two"));

        assert_eq!(
            manager.switch_session("two").err(),
            Some(GameError::AlreadyActive)
        );
        assert_eq!(
            manager.switch_session("three").err(),
            Some(GameError::UnknownSession)
        );
        manager.switch_session("one").expect("switched");
        assert!(manager.is_active("one"));

        manager.delete_session("one").expect("deleted");
        assert_eq!(manager.active_id(), None);
        assert!(manager.is_available(CommandKind::SwitchSession));
        assert!(!manager.is_available(CommandKind::Show));
    }

    #[test]
    fn test_switch_availability() {
        let mut manager = SessionManager::new();
        assert!(!manager.is_available(CommandKind::SwitchSession));
        manager.create_session("one", "m", grid(), 2, None).expect("created");
        assert!(!manager.is_available(CommandKind::SwitchSession));
        manager.create_session("two", "m", grid(), 2, None).expect("created");
        assert!(manager.is_available(CommandKind::SwitchSession));
    }
}
