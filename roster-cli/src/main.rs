//! Roster CLI - Command-line harness for team generation and brackets
//!
//! Commands:
//! - teams: Partition a roster file into teams
//! - tournament: Run an elimination bracket over a team file

mod teams_cmd;
mod tournament_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Balanced team generation and elimination brackets")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a roster into teams
    Teams(teams_cmd::TeamsArgs),
    /// Simulate an elimination tournament
    Tournament(tournament_cmd::TournamentArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Teams(args) => teams_cmd::run(args, cli.seed),
        Commands::Tournament(args) => tournament_cmd::run(args, cli.seed),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
