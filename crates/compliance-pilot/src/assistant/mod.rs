//! Role-personalized chat assistant: canned-response selection, chat sessions
//! with a delayed reply, and the HTTP surface over both.

pub mod message;
pub mod repository;
pub mod responses;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use message::{Author, ChatMessage};
pub use repository::{RepositoryError, SessionRepository};
pub use responses::{
    extract_risk_score, CannedResponse, QuickPrompt, ResponseRule, ResponseTable,
    ResponseTableError, ResponseTopic, QUICK_PROMPTS,
};
pub use router::assistant_router;
pub use service::{AskResponse, AssistantError, AssistantService};
pub use session::{
    ChatSession, SessionError, SessionId, SessionView, SubmitOutcome, DEFAULT_REPLY_DELAY,
};
