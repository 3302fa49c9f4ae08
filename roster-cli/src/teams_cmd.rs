//! Teams command - partition a roster into balanced teams
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_roster(), build_config(), report_teams()
//! - Level 3: team_summary()
//! - Level 4: RNG and formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use roster_core::{Roster, Team};
use roster_teams::{generate_teams, partition_cost, PartitionConfig, DEFAULT_RUNS};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Shuffle and deal round-robin
    Random,
    /// Skill-ranked snake draft
    Snake,
    /// Weighted clustering, best of several runs
    Balanced,
}

#[derive(Args)]
pub struct TeamsArgs {
    /// Roster JSON file (full roster or bare player list)
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Number of teams to create
    #[arg(long)]
    pub teams: usize,

    /// Partition strategy
    #[arg(long, value_enum, default_value = "snake")]
    pub strategy: StrategyArg,

    /// Balanced runs to choose from
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Swap refinement iteration cap (balanced only)
    #[arg(long, value_name = "N")]
    pub refine: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the generated teams to a JSON file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run teams command
///
/// 1. Load the roster
/// 2. Partition it
/// 3. Report, and optionally save, the teams
pub fn run(args: TeamsArgs, seed: Option<u64>) -> Result<()> {
    let roster = load_roster(&args)?;
    let config = build_config(&args);
    let mut rng = create_rng(seed);

    tracing::info!(
        "Generating {} teams from {} players ({:?})",
        args.teams,
        roster.players.len(),
        config.strategy
    );

    let teams = generate_teams(&roster.players, args.teams, &roster.weights, &config, &mut rng);
    if teams.is_empty() {
        tracing::warn!("No teams generated (empty roster or zero teams)");
    }

    if let Some(path) = &args.output {
        Team::save_all(&teams, path)
            .with_context(|| format!("Failed to write teams: {}", path.display()))?;
        tracing::info!("Saved {} teams to {}", teams.len(), path.display());
    }

    report_teams(&teams, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_roster(args: &TeamsArgs) -> Result<Roster> {
    Roster::load(&args.roster)
        .with_context(|| format!("Failed to load roster: {}", args.roster.display()))
}

fn build_config(args: &TeamsArgs) -> PartitionConfig {
    match args.strategy {
        StrategyArg::Random => PartitionConfig::random(),
        StrategyArg::Snake => PartitionConfig::snake_draft(),
        StrategyArg::Balanced => {
            let config = PartitionConfig::balanced(args.runs);
            match args.refine {
                Some(cap) => config.with_refinement(cap),
                None => config,
            }
        }
    }
}

fn report_teams(teams: &[Team], args: &TeamsArgs) -> Result<()> {
    if args.json {
        print_json_teams(teams)
    } else {
        print_text_teams(teams);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// One printable line per team
fn team_summary(team: &Team) -> String {
    let members: Vec<String> = team.players().iter().map(|p| p.display_name()).collect();
    format!(
        "{:<3} {:<8} avg {:>4.2}  {}",
        team.id(),
        team.name(),
        team.average_rating(),
        members.join(", ")
    )
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_json_teams(teams: &[Team]) -> Result<()> {
    let json = serde_json::to_string_pretty(teams).context("Failed to serialize teams")?;
    println!("{}", json);
    Ok(())
}

fn print_text_teams(teams: &[Team]) {
    println!("\n=== Teams ===");
    for team in teams {
        println!("{}", team_summary(team));
    }
    if !teams.is_empty() {
        println!("\nPartition cost: {:.4}", partition_cost(teams));
    }
}
