use crate::commands::{
    run_draft, run_import, run_screen, run_tracker_summary, DraftArgs, ImportArgs, ScreenArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_scout::config::AppConfig;
use job_scout::error::AppError;
use job_scout::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "job-scout",
    about = "Screen job listings against personal search criteria and track the matches",
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
    /// Screen a single listing, optionally tracking and drafting outreach
    Screen(ScreenArgs),
    /// Screen a pasted JSON or CSV batch of listings
    Import(ImportArgs),
    /// Inspect the opportunity tracker
    Tracker {
        #[command(subcommand)]
        command: TrackerCommand,
    },
    /// Draft an outreach email for a listing
    Draft(DraftArgs),
}

#[derive(Subcommand, Debug)]
enum TrackerCommand {
    /// Print totals, applied count, average salary, and remote count
    Summary,
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

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Screen(args) => run_screen(&config, args).await,
        Command::Import(args) => run_import(&config, args).await,
        Command::Tracker {
            command: TrackerCommand::Summary,
        } => run_tracker_summary(&config).await,
        Command::Draft(args) => run_draft(&config, args).await,
    }
}
