use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::message::{Author, ChatMessage};
use super::responses::{ResponseTable, ResponseTopic};
use crate::roles::{Role, RoleProfile};

/// Pause before a canned reply is delivered.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

#[derive(Debug)]
pub(super) struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
    /// User message still waiting for its reply.
    awaiting: Option<u64>,
}

impl Transcript {
    fn push(&mut self, author: Author, text: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage::new(id, author, text));
        id
    }
}

fn lock(transcript: &Mutex<Transcript>) -> MutexGuard<'_, Transcript> {
    transcript.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of handing a prompt to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Whitespace-only input; nothing was recorded.
    Ignored,
    Scheduled {
        message_id: u64,
        topic: ResponseTopic,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a reply is still being prepared")]
    ReplyPending,
    #[error("no async runtime available to schedule the reply")]
    NoRuntime,
}

/// Snapshot of a conversation for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub role: Role,
    pub role_title: String,
    pub typing: bool,
    pub quick_prompts_visible: bool,
    pub messages: Vec<ChatMessage>,
}

/// Conversation between one role and the canned assistant.
///
/// Replies are delivered by a task that sleeps for the configured delay. The
/// task only holds a weak reference to the transcript and is aborted when the
/// session is cancelled or dropped, so a torn-down session never receives it.
pub struct ChatSession {
    id: SessionId,
    profile: RoleProfile,
    responses: Arc<ResponseTable>,
    reply_delay: Duration,
    transcript: Arc<Mutex<Transcript>>,
    pending: Option<JoinHandle<()>>,
}

impl ChatSession {
    pub fn new(
        id: SessionId,
        profile: RoleProfile,
        responses: Arc<ResponseTable>,
        reply_delay: Duration,
    ) -> Self {
        let mut transcript = Transcript {
            messages: Vec::new(),
            next_id: 1,
            awaiting: None,
        };
        transcript.push(Author::Assistant, format!("👋 {}", profile.welcome_message));

        info!(session = %id.0, role = %profile.id, "chat session started");

        Self {
            id,
            profile,
            responses,
            reply_delay,
            transcript: Arc::new(Mutex::new(transcript)),
            pending: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.profile.id
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn is_typing(&self) -> bool {
        lock(&self.transcript).awaiting.is_some()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.transcript).messages.clone()
    }

    pub fn quick_prompts_visible(&self) -> bool {
        lock(&self.transcript).messages.len() <= 1
    }

    pub fn view(&self) -> SessionView {
        let transcript = lock(&self.transcript);
        SessionView {
            session_id: self.id.clone(),
            role: self.profile.id,
            role_title: self.profile.title.clone(),
            typing: transcript.awaiting.is_some(),
            quick_prompts_visible: transcript.messages.len() <= 1,
            messages: transcript.messages.clone(),
        }
    }

    /// Record a user prompt and schedule the canned reply.
    pub fn submit(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let reply = self.responses.respond(text, &self.profile);

        let message_id = {
            let mut transcript = lock(&self.transcript);
            if transcript.awaiting.is_some() {
                return Err(SessionError::ReplyPending);
            }
            let id = transcript.push(Author::User, trimmed.to_string());
            transcript.awaiting = Some(id);
            id
        };

        let transcript = Arc::downgrade(&self.transcript);
        let delay = self.reply_delay;
        let session = self.id.clone();
        let text = reply.text;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(transcript) = transcript.upgrade() else {
                debug!(session = %session.0, "session closed before reply; dropping it");
                return;
            };
            let mut transcript = lock(&transcript);
            if transcript.awaiting != Some(message_id) {
                return;
            }
            let id = transcript.push(Author::Assistant, text);
            transcript.awaiting = None;
            debug!(session = %session.0, message_id = id, "reply delivered");
        }));

        debug!(
            session = %self.id.0,
            message_id,
            topic = ?reply.topic,
            delay_ms = self.reply_delay.as_millis() as u64,
            "reply scheduled"
        );

        Ok(SubmitOutcome::Scheduled {
            message_id,
            topic: reply.topic,
        })
    }

    /// Abort a reply that has not been delivered yet. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };

        let mut transcript = lock(&self.transcript);
        if transcript.awaiting.take().is_none() {
            return false;
        }

        handle.abort();
        info!(session = %self.id.0, "pending reply cancelled");
        true
    }

    /// Wait for the pending reply, if any, to land in the transcript.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(err) = handle.await {
                debug!(session = %self.id.0, error = %err, "reply task did not complete");
            }
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
impl ChatSession {
    pub(super) fn reply_task(&self) -> Option<tokio::task::AbortHandle> {
        self.pending.as_ref().map(JoinHandle::abort_handle)
    }

    pub(super) fn transcript_ref(&self) -> std::sync::Weak<Mutex<Transcript>> {
        Arc::downgrade(&self.transcript)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("role", &self.profile.id)
            .field("typing", &self.is_typing())
            .finish_non_exhaustive()
    }
}
