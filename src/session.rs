//! Game session management: one game per session id.

use crate::source::{SecretSource, SourceError};
use derive_more::{Display, From};
use mastermind_core::{Code, GameConfig, GameSession, GameView, GuessError, SetupError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Opaque identifier for a player's session.
pub type SessionId = String;

/// Error raised by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// No game under this id.
    #[display("No game found for session {}", _0)]
    NotFound(SessionId),

    /// The guess was rejected.
    #[from]
    #[display("{}", _0)]
    Guess(GuessError),

    /// The rules or secret were rejected.
    #[from]
    #[display("{}", _0)]
    Setup(SetupError),

    /// The secret provider failed.
    #[from]
    #[display("{}", _0)]
    Source(SourceError),

    /// Another thread panicked while holding the store.
    #[display("Session store lock poisoned")]
    LockPoisoned,
}

impl std::error::Error for SessionError {}

/// Manages all game sessions.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    source: Arc<dyn SecretSource>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates an empty store drawing secrets from `source`.
    #[instrument(skip(source))]
    pub fn new(source: Arc<dyn SecretSource>) -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            source,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, GameSession>>, SessionError> {
        self.sessions.lock().map_err(|_| {
            warn!("Session store lock poisoned");
            SessionError::LockPoisoned
        })
    }

    /// Starts a new game under `id`, abandoning any game already there.
    #[instrument(skip(self, config), fields(symbol_count = *config.symbol_count()))]
    pub async fn start_game(
        &self,
        id: SessionId,
        config: GameConfig,
    ) -> Result<GameView, SessionError> {
        let secret: Code = self
            .source
            .generate(*config.symbol_count(), *config.range())
            .await?;
        let session = GameSession::new(config, secret)?;
        let view = session.view();

        let replaced = self.lock()?.insert(id.clone(), session).is_some();
        info!(session_id = %id, replaced, "Started new game");
        Ok(view)
    }

    /// Scores a guess in the game under `id`.
    #[instrument(skip(self, guess))]
    pub fn submit_guess(
        &self,
        id: &str,
        guess: impl Into<Code>,
    ) -> Result<GameView, SessionError> {
        let mut sessions = self.lock()?;
        let session = sessions.get_mut(id).ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::NotFound(id.to_string())
        })?;

        let result = session.submit_guess(guess)?;
        info!(
            session_id = id,
            correct = *result.correct_count(),
            positioned = *result.correct_position_count(),
            status = %session.status(),
            "Guess scored"
        );
        Ok(session.view())
    }

    /// Current view of the game under `id`.
    #[instrument(skip(self))]
    pub fn view(&self, id: &str) -> Result<GameView, SessionError> {
        self.lock()?
            .get(id)
            .map(GameSession::view)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Copy of the full game under `id`, secret included, for persistence.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &str) -> Result<Option<GameSession>, SessionError> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Stores a game under `id`, e.g. one rebuilt with [`GameSession::replay`].
    #[instrument(skip(self, session))]
    pub fn insert_session(&self, id: SessionId, session: GameSession) -> Result<(), SessionError> {
        self.lock()?.insert(id, session);
        debug!("Session stored");
        Ok(())
    }

    /// Evicts the game under `id`, returning it if present.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<Option<GameSession>, SessionError> {
        let removed = self.lock()?.remove(id);
        debug!(found = removed.is_some(), "Session removed");
        Ok(removed)
    }

    /// Lists all active session ids.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, SessionError> {
        let ids: Vec<_> = self.lock()?.keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        Ok(ids)
    }
}
