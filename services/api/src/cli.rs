use crate::commands::{run_check, run_history, run_rules, CheckArgs, HistoryArgs, RulesCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use intern_check::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "intern-check",
    about = "Score internship postings for credibility over HTTP or from the command line",
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
    /// Score a single posting and print the verdict
    Check(CheckArgs),
    /// Inspect or extend the scam pattern table
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// List recently recorded checks
    History(HistoryArgs),
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
        Command::Check(args) => run_check(args),
        Command::Rules { command } => run_rules(command),
        Command::History(args) => run_history(args),
    }
}
