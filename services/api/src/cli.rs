use crate::demo::{run_demo, run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fses::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "First Stage Evaluation System",
    about = "Serve and explore examiner and chairperson nominations from the command line",
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
    /// Print the nomination dashboard and workload for the seeded faculty
    Report(ReportArgs),
    /// Walk a supervisor to coordinator nomination flow on seeded data
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load the demo faculty into the in-memory store before serving
    #[arg(long)]
    pub(crate) seed: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Demo => run_demo(),
    }
}
