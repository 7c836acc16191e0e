use crate::demo::{run_demo, run_score_log, DemoArgs, ScoreLogArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use courier_scoreboard::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Courier Scoreboard",
    about = "Score courier training runs and serve the results to instructor dashboards",
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
    /// Decode and score a raw session log without persisting anything
    ScoreLog(ScoreLogArgs),
    /// Run an end-to-end demo: seed a roster, import logs, score, summarize
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the in-memory roster with sample players and a sample class
    #[arg(long)]
    pub(crate) demo_data: bool,
    /// Session log CSV export to register as match attempts at startup
    #[arg(long)]
    pub(crate) sessions: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::ScoreLog(args) => run_score_log(args),
        Command::Demo(args) => run_demo(args),
    }
}
