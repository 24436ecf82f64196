use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::responses::extract_risk_score;
use crate::scoring::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Badge for assistant replies that quote a `Risk: LEVEL (n/100)` score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLevel>,
}

impl ChatMessage {
    pub(crate) fn new(id: u64, author: Author, text: String) -> Self {
        let risk = match author {
            Author::Assistant => extract_risk_score(&text).map(RiskLevel::from_score),
            Author::User => None,
        };

        Self {
            id,
            author,
            text,
            timestamp: Utc::now(),
            risk,
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.author == Author::Assistant
    }
}
