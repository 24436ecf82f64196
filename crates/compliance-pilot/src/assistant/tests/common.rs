use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::assistant::repository::{RepositoryError, SessionRepository};
use crate::assistant::responses::ResponseTable;
use crate::assistant::service::AssistantService;
use crate::assistant::session::{ChatSession, SessionId, SessionView};
use crate::config::AssistantConfig;
use crate::roles::{Role, RoleDirectory};

pub(super) const REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Sleep long enough for a scheduled reply to land under paused time.
pub(super) async fn wait_for_reply() {
    tokio::time::sleep(REPLY_DELAY + Duration::from_millis(100)).await;
}

pub(super) fn assistant_config() -> AssistantConfig {
    AssistantConfig {
        reply_delay: REPLY_DELAY,
        ..AssistantConfig::default()
    }
}

pub(super) fn session_for(role: Role) -> ChatSession {
    let directory = RoleDirectory::standard();
    ChatSession::new(
        SessionId(format!("test-{role}")),
        directory.profile(role).clone(),
        Arc::new(ResponseTable::standard()),
        REPLY_DELAY,
    )
}

pub(super) fn build_service() -> (
    Arc<AssistantService<MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(AssistantService::standard(
        repository.clone(),
        assistant_config(),
    ));
    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    sessions: Mutex<HashMap<SessionId, ChatSession>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.sessions.lock().expect("sessions mutex poisoned").len()
    }
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: ChatSession) -> Result<SessionView, RepositoryError> {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        let view = session.view();
        guard.insert(session.id().clone(), session);
        Ok(view)
    }

    fn with_session<T, F>(&self, id: &SessionId, action: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut ChatSession) -> T,
    {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard
            .get_mut(id)
            .map(action)
            .ok_or(RepositoryError::NotFound)
    }

    fn remove(&self, id: &SessionId) -> Result<ChatSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn active(&self) -> Result<Vec<SessionId>, RepositoryError> {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: ChatSession) -> Result<SessionView, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn with_session<T, F>(&self, _id: &SessionId, _action: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut ChatSession) -> T,
    {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<ChatSession, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn active(&self) -> Result<Vec<SessionId>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
