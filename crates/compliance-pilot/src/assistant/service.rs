use std::sync::Arc;

use tracing::info;

use super::repository::{RepositoryError, SessionRepository};
use super::responses::ResponseTable;
use super::session::{
    next_session_id, ChatSession, SessionError, SessionId, SessionView, SubmitOutcome,
};
use crate::config::AssistantConfig;
use crate::dashboard::ComplianceDashboard;
use crate::roles::{Role, RoleDirectory, RoleProfile};

/// Service composing the role directory, response table, and session store.
pub struct AssistantService<R> {
    directory: Arc<RoleDirectory>,
    responses: Arc<ResponseTable>,
    repository: Arc<R>,
    config: AssistantConfig,
}

/// Reply to a submitted prompt along with the conversation as it now stands.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AskResponse {
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
    pub session: SessionView,
}

impl<R> AssistantService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(
        directory: RoleDirectory,
        responses: ResponseTable,
        repository: Arc<R>,
        config: AssistantConfig,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            responses: Arc::new(responses),
            repository,
            config,
        }
    }

    /// Service over the built-in role and response tables.
    pub fn standard(repository: Arc<R>, config: AssistantConfig) -> Self {
        Self::new(
            RoleDirectory::standard(),
            ResponseTable::standard(),
            repository,
            config,
        )
    }

    pub fn roles(&self) -> &[RoleProfile] {
        self.directory.profiles()
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Open a conversation for the selected role, seeded with its welcome message.
    pub fn start_session(&self, role: Role) -> Result<SessionView, AssistantError> {
        let session = ChatSession::new(
            next_session_id(),
            self.directory.profile(role).clone(),
            Arc::clone(&self.responses),
            self.config.reply_delay,
        );
        Ok(self.repository.insert(session)?)
    }

    pub fn ask(&self, id: &SessionId, text: &str) -> Result<AskResponse, AssistantError> {
        let (outcome, session) = self.repository.with_session(id, |session| {
            session
                .submit(text)
                .map(|outcome| (outcome, session.view()))
        })??;
        Ok(AskResponse { outcome, session })
    }

    pub fn session(&self, id: &SessionId) -> Result<SessionView, AssistantError> {
        Ok(self.repository.with_session(id, |session| session.view())?)
    }

    /// Close a conversation, cancelling any reply still in flight.
    pub fn end_session(&self, id: &SessionId) -> Result<SessionView, AssistantError> {
        let mut session = self.repository.remove(id)?;
        let cancelled = session.cancel_pending();
        let view = session.view();
        info!(session = %id.0, cancelled_reply = cancelled, "chat session ended");
        Ok(view)
    }

    /// Dashboard for a role, or the generic view when no role is selected.
    pub fn dashboard(&self, role: Option<Role>) -> ComplianceDashboard {
        ComplianceDashboard::build(
            role,
            self.config.metrics,
            self.config.risk_score,
            self.config.risk_concentration.as_deref(),
        )
    }

    pub fn session_dashboard(
        &self,
        id: &SessionId,
    ) -> Result<ComplianceDashboard, AssistantError> {
        let role = self.repository.with_session(id, |session| session.role())?;
        Ok(self.dashboard(Some(role)))
    }
}

/// Error raised by the assistant service.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
