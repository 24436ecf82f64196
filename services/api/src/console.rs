use crate::infra::load_tables;
use clap::Args;
use compliance_pilot::assistant::{
    Author, ChatMessage, ChatSession, SessionError, SessionId, SubmitOutcome, QUICK_PROMPTS,
};
use compliance_pilot::config::{AppConfig, AssistantConfig};
use compliance_pilot::dashboard::ComplianceDashboard;
use compliance_pilot::error::AppError;
use compliance_pilot::roles::Role;
use compliance_pilot::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Personalize the dashboard for a role (e.g. clo, hr-admin)
    #[arg(long)]
    pub(crate) role: Option<Role>,
    /// Emit the dashboard as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ChatArgs {
    /// Role to chat as (clo, hr-admin, chief-of-staff, line-manager, division-director)
    pub(crate) role: Role,
    /// Prompt to send; repeat for several. Reads stdin when omitted.
    #[arg(long)]
    pub(crate) ask: Vec<String>,
    /// Override the simulated reply delay in milliseconds
    #[arg(long)]
    pub(crate) delay_ms: Option<u64>,
}

pub(crate) fn run_roles() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (directory, _) = load_tables(&config.tables)?;

    println!("Select your role");
    for profile in directory.profiles() {
        println!(
            "  {} {:<24} [{}]\n      {}",
            profile.icon, profile.title, profile.id, profile.description
        );
    }
    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dashboard = build_dashboard(&config.assistant, args.role);

    if args.json {
        let rendered = serde_json::to_string_pretty(&dashboard).map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        print!("{}", render_dashboard(&dashboard));
    }
    Ok(())
}

fn build_dashboard(config: &AssistantConfig, role: Option<Role>) -> ComplianceDashboard {
    ComplianceDashboard::build(
        role,
        config.metrics,
        config.risk_score,
        config.risk_concentration.as_deref(),
    )
}

pub(crate) fn render_dashboard(dashboard: &ComplianceDashboard) -> String {
    let compliance = &dashboard.compliance;
    let mut out = String::new();

    out.push_str(&format!("{}\n", compliance.role_specific_label));
    if !compliance.role_specific_subtext.is_empty() {
        out.push_str(&format!("  {}\n", compliance.role_specific_subtext));
    }
    out.push_str(&format!(
        "  Status: {} ({}) | Trend: {:?}\n",
        compliance.status_label, compliance.tone, dashboard.trend
    ));
    out.push_str(&format!(
        "  Risk: {} ({}/100)\n",
        dashboard.risk.label, dashboard.risk.score
    ));

    out.push_str("\nQuick stats\n");
    for stat in &dashboard.quick_stats {
        out.push_str(&format!(
            "  - {:<12} {:>4}  {}\n",
            stat.label, stat.value, stat.sublabel
        ));
    }

    out.push_str("\nScore breakdown\n");
    for entry in &dashboard.breakdown {
        out.push_str(&format!(
            "  - {:<16} {:>3}% x {:>2}% weight\n",
            entry.label, entry.value, entry.weight_pct
        ));
    }

    out.push_str(&format!("\nKey insight: {}\n", dashboard.key_insight));

    out.push_str("\nIndustry expectations\n");
    for expectation in &dashboard.industry_expectations {
        out.push_str(&format!(
            "  - {:<20} {}%\n",
            expectation.industry, expectation.expected_level
        ));
    }
    out
}

pub(crate) async fn run_chat(args: ChatArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let (directory, responses) = load_tables(&config.tables)?;
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.assistant.reply_delay);
    let mut session = ChatSession::new(
        SessionId(format!("cli-{}", args.role)),
        directory.profile(args.role).clone(),
        Arc::new(responses),
        delay,
    );

    println!("{} {}", session.profile().icon, session.profile().title);
    print_messages(&session.messages());

    if !args.ask.is_empty() {
        for prompt in &args.ask {
            exchange(&mut session, prompt).await?;
        }
        return Ok(());
    }

    println!("\nTry asking:");
    for prompt in QUICK_PROMPTS {
        println!("  {} {}", prompt.icon, prompt.text);
    }
    println!("(type 'exit' to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        exchange(&mut session, &line).await?;
    }

    session.cancel_pending();
    Ok(())
}

async fn exchange(session: &mut ChatSession, prompt: &str) -> Result<(), AppError> {
    let seen = session.messages().len();
    match session.submit(prompt) {
        Ok(SubmitOutcome::Ignored) => return Ok(()),
        Ok(SubmitOutcome::Scheduled { .. }) => {}
        Err(SessionError::ReplyPending) => {
            println!("(still typing, please wait)");
            return Ok(());
        }
        Err(err) => return Err(AppError::Assistant(err.into())),
    }

    let messages = session.messages();
    print_messages(&messages[seen..]);
    println!("  ...");
    session.settle().await;
    print_messages(&session.messages()[seen + 1..]);
    Ok(())
}

fn print_messages(messages: &[ChatMessage]) {
    for message in messages {
        let speaker = match message.author {
            Author::User => "you",
            Author::Assistant => "assistant",
        };
        println!("\n[{}] {}:", message.timestamp.format("%H:%M"), speaker);
        for line in message.text.lines() {
            println!("  {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_dashboard_lists_every_section() {
        let dashboard = build_dashboard(&AssistantConfig::default(), Some(Role::LineManager));
        let rendered = render_dashboard(&dashboard);

        assert!(rendered.starts_with("Your Team Compliance: 87%\n  3 actions required\n"));
        assert!(rendered.contains("Status: Good (Minor attention needed)"));
        assert!(rendered.contains("Risk: Elevated Risk (68/100)"));
        assert!(rendered.contains("Valid Certs"));
        assert!(rendered.contains("Completion Rate"));
        assert!(rendered.contains("Aviation"));
    }

    #[test]
    fn generic_dashboard_omits_empty_subtext() {
        let dashboard = build_dashboard(&AssistantConfig::default(), None);
        let rendered = render_dashboard(&dashboard);

        assert!(rendered.starts_with("Compliance Level: 91%\n  Status:"));
    }

    #[tokio::test(start_paused = true)]
    async fn exchange_waits_for_the_reply() {
        let (directory, responses) =
            load_tables(&Default::default()).expect("builtin tables");
        let mut session = ChatSession::new(
            SessionId("cli-test".to_string()),
            directory.profile(Role::HrAdmin).clone(),
            Arc::new(responses),
            Duration::from_millis(1500),
        );

        exchange(&mut session, "Are we audit-ready?")
            .await
            .expect("exchange completes");
        exchange(&mut session, "  ").await.expect("blank ignored");

        assert_eq!(session.messages().len(), 3);
        assert!(!session.is_typing());
    }
}
