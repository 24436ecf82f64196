use compliance_pilot::assistant::{
    ChatSession, RepositoryError, ResponseTable, SessionId, SessionRepository, SessionView,
};
use compliance_pilot::config::{TableSources, DEFAULT_MAX_SESSIONS};
use compliance_pilot::error::AppError;
use compliance_pilot::roles::RoleDirectory;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session store bounded to `capacity` live sessions; the oldest session is
/// evicted, and its pending reply cancelled, when a new one would exceed it.
#[derive(Clone)]
pub(crate) struct InMemorySessionRepository {
    store: Arc<Mutex<SessionStore>>,
    capacity: usize,
}

#[derive(Default)]
struct SessionStore {
    sessions: HashMap<SessionId, ChatSession>,
    order: VecDeque<SessionId>,
}

impl InMemorySessionRepository {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, SessionStore>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: ChatSession) -> Result<SessionView, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.sessions.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }

        while guard.sessions.len() >= self.capacity {
            let Some(oldest) = guard.order.pop_front() else {
                break;
            };
            if guard.sessions.remove(&oldest).is_some() {
                info!(
                    session = %oldest.0,
                    capacity = self.capacity,
                    "evicted oldest chat session"
                );
            }
        }

        let view = session.view();
        guard.order.push_back(session.id().clone());
        guard.sessions.insert(session.id().clone(), session);
        Ok(view)
    }

    fn with_session<T, F>(&self, id: &SessionId, action: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut ChatSession) -> T,
    {
        let mut guard = self.guard()?;
        guard
            .sessions
            .get_mut(id)
            .map(action)
            .ok_or(RepositoryError::NotFound)
    }

    fn remove(&self, id: &SessionId) -> Result<ChatSession, RepositoryError> {
        let mut guard = self.guard()?;
        let session = guard.sessions.remove(id).ok_or(RepositoryError::NotFound)?;
        guard.order.retain(|queued| queued != id);
        Ok(session)
    }

    fn active(&self) -> Result<Vec<SessionId>, RepositoryError> {
        let mut ids: Vec<SessionId> = self.guard()?.sessions.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// Load the role directory and response table, preferring JSON overrides.
pub(crate) fn load_tables(
    sources: &TableSources,
) -> Result<(RoleDirectory, ResponseTable), AppError> {
    let directory = match &sources.role_directory {
        Some(path) => {
            info!(path = %path.display(), "loading role directory");
            RoleDirectory::from_path(path)?
        }
        None => RoleDirectory::standard(),
    };

    let responses = match &sources.response_table {
        Some(path) => {
            info!(path = %path.display(), "loading response table");
            ResponseTable::from_path(path)?
        }
        None => ResponseTable::standard(),
    };

    Ok((directory, responses))
}
