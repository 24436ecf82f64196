use super::session::{ChatSession, SessionId, SessionView};

/// Storage abstraction for live chat sessions.
///
/// Sessions own their pending reply task, so they are handed out through a
/// closure rather than cloned.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: ChatSession) -> Result<SessionView, RepositoryError>;
    fn with_session<T, F>(&self, id: &SessionId, action: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut ChatSession) -> T;
    fn remove(&self, id: &SessionId) -> Result<ChatSession, RepositoryError>;
    fn active(&self) -> Result<Vec<SessionId>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
