use crate::report::{run_decide, run_normalize, DecideArgs, NormalizeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use optima_underwriter::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "OptimaAI Underwriter",
    about = "Normalize, underwrite and decide insurance quotes from the command line",
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
    /// Run the full decision pipeline over a quote payload file
    Decide(DecideArgs),
    /// Map a quote payload file into the canonical schema
    Normalize(NormalizeArgs),
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
        Command::Decide(args) => run_decide(args).await,
        Command::Normalize(args) => run_normalize(args),
    }
}
