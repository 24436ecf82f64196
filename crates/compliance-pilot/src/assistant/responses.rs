use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::roles::RoleProfile;

/// Canned answer categories, listed in matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTopic {
    RiskToday,
    AuditReadiness,
    RiskTrend,
    Actions,
    Fallback,
}

/// Trigger phrases for one topic and the template returned when any matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRule {
    pub topic: ResponseTopic,
    pub triggers: Vec<String>,
    pub template: String,
}

/// Selected reply for a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CannedResponse {
    pub topic: ResponseTopic,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResponseTable")]
pub struct ResponseTable {
    rules: Vec<ResponseRule>,
    /// Rendered with `{prompt}` and `{role}` substituted.
    fallback: String,
}

#[derive(Debug, Deserialize)]
struct RawResponseTable {
    rules: Vec<ResponseRule>,
    fallback: String,
}

impl TryFrom<RawResponseTable> for ResponseTable {
    type Error = ResponseTableError;

    fn try_from(raw: RawResponseTable) -> Result<Self, Self::Error> {
        Self::new(raw.rules, raw.fallback)
    }
}

const RISK_TODAY_TEMPLATE: &str = "**Compliance Risk: HIGH (68/100)**

This risk is driven by overdue training in regulated roles and certifications approaching expiration.

Here's what I found:
• 23 employees have overdue mandatory training
• 12 certifications expire within 30 days
• 3 high-risk departments need immediate attention

Focusing on these items in the next two weeks will significantly reduce exposure.

Would you like help addressing this now?";

const AUDIT_READINESS_TEMPLATE: &str = "**Audit Readiness: MODERATE**

You're partially prepared, but there are areas needing attention before a formal audit.

Current status:
• Documentation: 87% complete
• Training records: 94% up-to-date
• Policy acknowledgments: 76% signed

The main gaps are in policy acknowledgments and 3 missing training records in the Finance department.

I can generate an audit summary if you'd like.";

const RISK_TREND_TEMPLATE: &str = "**Risk Trend Analysis**

Risk is increasing in two key areas:

1. **Operations Division** (+15% this month)
   - New hires without completed onboarding
   - Delayed annual compliance training

2. **Customer Service** (+8% this month)
   - Data privacy training gaps
   - GDPR refresher courses overdue

These increases are addressable with focused action in the next 2 weeks.";

const ACTIONS_TEMPLATE: &str = "**Recommended Actions**

Based on your current risk profile, here are your priority actions:

1. **Urgent** - Notify 23 employees about overdue training
2. **This week** - Review 12 expiring certifications
3. **This month** - Complete policy acknowledgment campaign

Starting with the urgent items will have the biggest impact on your risk score.

Would you like me to help with any of these?";

const FALLBACK_TEMPLATE: &str = "I understand you're asking about \"{prompt}\".

Based on the learning and compliance data I have access to, I can provide insights tailored to your role as {role}.

Here's what I can help you with:
• Current compliance risk assessment
• Training completion status
• Upcoming deadlines and expirations
• Actionable recommendations

What specific aspect would you like to explore?";

impl ResponseTable {
    pub fn standard() -> Self {
        let rule = |topic, triggers: &[&str], template: &str| ResponseRule {
            topic,
            triggers: triggers.iter().map(|phrase| phrase.to_string()).collect(),
            template: template.to_string(),
        };

        Self {
            rules: vec![
                rule(
                    ResponseTopic::RiskToday,
                    &["compliance risk today", "risk today"],
                    RISK_TODAY_TEMPLATE,
                ),
                rule(
                    ResponseTopic::AuditReadiness,
                    &["audit-ready", "audit ready"],
                    AUDIT_READINESS_TEMPLATE,
                ),
                rule(
                    ResponseTopic::RiskTrend,
                    &["risk increasing", "where is risk"],
                    RISK_TREND_TEMPLATE,
                ),
                rule(
                    ResponseTopic::Actions,
                    &["actions", "what should i"],
                    ACTIONS_TEMPLATE,
                ),
            ],
            fallback: FALLBACK_TEMPLATE.to_string(),
        }
    }

    /// Trigger phrases are lowercased so matching stays case-insensitive
    /// regardless of how the table was authored.
    pub fn new(rules: Vec<ResponseRule>, fallback: String) -> Result<Self, ResponseTableError> {
        let mut normalized = Vec::with_capacity(rules.len());
        for mut rule in rules {
            if rule.topic == ResponseTopic::Fallback {
                return Err(ResponseTableError::FallbackRule);
            }
            rule.triggers = rule
                .triggers
                .into_iter()
                .map(|phrase| phrase.trim().to_lowercase())
                .filter(|phrase| !phrase.is_empty())
                .collect();
            if rule.triggers.is_empty() {
                return Err(ResponseTableError::EmptyTriggers(rule.topic));
            }
            normalized.push(rule);
        }

        Ok(Self {
            rules: normalized,
            fallback,
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ResponseTableError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ResponseTableError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    /// First rule with a trigger contained in the prompt wins; the fallback
    /// echoes the prompt and the role title.
    pub fn respond(&self, prompt: &str, role: &RoleProfile) -> CannedResponse {
        let lowered = prompt.to_lowercase();

        self.rules
            .iter()
            .find(|rule| {
                rule.triggers
                    .iter()
                    .any(|phrase| lowered.contains(phrase.as_str()))
            })
            .map(|rule| CannedResponse {
                topic: rule.topic,
                text: rule.template.clone(),
            })
            .unwrap_or_else(|| CannedResponse {
                topic: ResponseTopic::Fallback,
                text: self.render_fallback(prompt, role),
            })
    }

    /// Placeholders are filled from the template only; the prompt is echoed verbatim.
    fn render_fallback(&self, prompt: &str, role: &RoleProfile) -> String {
        self.fallback
            .split("{prompt}")
            .map(|piece| piece.replace("{role}", &role.title))
            .collect::<Vec<_>>()
            .join(prompt)
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseTableError {
    #[error("response rule for {0:?} has no trigger phrases")]
    EmptyTriggers(ResponseTopic),
    #[error("the fallback topic cannot carry trigger phrases")]
    FallbackRule,
    #[error("invalid response table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unable to read response table: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickPrompt {
    pub text: &'static str,
    pub icon: &'static str,
}

pub const QUICK_PROMPTS: [QuickPrompt; 4] = [
    QuickPrompt {
        text: "What is my compliance risk today?",
        icon: "📊",
    },
    QuickPrompt {
        text: "Are we audit-ready?",
        icon: "✅",
    },
    QuickPrompt {
        text: "Where is risk increasing?",
        icon: "📈",
    },
    QuickPrompt {
        text: "What actions should I take now?",
        icon: "🎯",
    },
];

static RISK_BADGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Risk:\s*(HIGH|MEDIUM|LOW)\s*\((\d+)/100\)").expect("risk badge pattern")
});

/// Pull a `Risk: HIGH (68/100)` style score out of an assistant reply.
pub fn extract_risk_score(text: &str) -> Option<i32> {
    RISK_BADGE
        .captures(text)
        .and_then(|captures| captures.get(2))
        .and_then(|score| score.as_str().parse().ok())
}
