use crate::console::{run_chat, run_dashboard, run_roles, ChatArgs, DashboardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use compliance_pilot::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Compliance Pilot",
    about = "Serve and explore the role-personalized compliance assistant",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the roles available in the role picker
    Roles,
    /// Print the compliance dashboard, optionally personalized for a role
    Dashboard(DashboardArgs),
    /// Chat with the assistant as a role from the terminal
    Chat(ChatArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Roles => run_roles(),
        Command::Dashboard(args) => run_dashboard(args),
        Command::Chat(args) => run_chat(args).await,
    }
}
