//! Tournament command - simulate an elimination bracket to completion
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_teams(), build_settings(), simulate(), report_results()
//! - Level 3: play_game(), describe_match()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use roster_core::Team;
use roster_tournament::{Bracket, Match, Standing, Tournament, TournamentSettings};

use crate::teams_cmd::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TournamentArgs {
    /// Team list JSON file (as written by `roster teams --output`)
    #[arg(long, value_name = "FILE")]
    pub teams: PathBuf,

    /// Tournament name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Single elimination instead of double
    #[arg(long)]
    pub single: bool,

    /// Game wins needed to take a preliminary match
    #[arg(long, default_value = "1")]
    pub prelim: u32,

    /// Game wins needed to take a finals match (double elimination only;
    /// single-elimination brackets use --prelim throughout)
    #[arg(long, default_value = "1")]
    pub championship: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run tournament command
///
/// 1. Load teams and build the bracket
/// 2. Play every match with random game winners
/// 3. Report the bracket and standings
pub fn run(args: TournamentArgs, seed: Option<u64>) -> Result<()> {
    let teams = load_teams(&args)?;
    let settings = build_settings(&args);
    let mut rng = create_rng(seed);

    let tournament = Tournament::new(&args.name, &teams, settings, &mut rng)
        .context("Failed to create tournament")?;

    tracing::info!(
        "Starting {} ({} teams, {})",
        tournament.name,
        tournament.teams.len(),
        if settings.double_elimination {
            "double elimination"
        } else {
            "single elimination"
        }
    );

    let finished = simulate(tournament, &mut rng)?;

    report_results(&finished, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_teams(args: &TournamentArgs) -> Result<Vec<Team>> {
    Team::load_all(&args.teams)
        .with_context(|| format!("Failed to load teams: {}", args.teams.display()))
}

fn build_settings(args: &TournamentArgs) -> TournamentSettings {
    if championship_ignored(args) {
        tracing::warn!(
            "--championship {} has no effect on a single-elimination bracket",
            args.championship
        );
    }
    let settings = if args.single {
        TournamentSettings::single_elimination(args.prelim)
    } else {
        TournamentSettings::double_elimination(args.prelim)
    };
    settings.with_championship_matches(args.championship)
}

/// Report game wins until no match is left to play
fn simulate(mut tournament: Tournament, rng: &mut ChaCha8Rng) -> Result<Tournament> {
    loop {
        let next_game = tournament
            .active_matches()
            .first()
            .map(|m| (m.id.clone(), play_game(m, rng)));
        let Some((match_id, winner)) = next_game else {
            break;
        };
        let Some(winner) = winner else {
            break;
        };
        tournament = tournament.try_progress(&match_id, &winner)?;
    }

    match &tournament.winner {
        Some(winner) => tracing::info!("Champion: {}", team_name(&tournament, winner)),
        None => tracing::warn!("Tournament stopped without a champion"),
    }
    Ok(tournament)
}

fn report_results(tournament: &Tournament, args: &TournamentArgs) -> Result<()> {
    if args.json {
        print_json_results(tournament)
    } else {
        print_text_results(tournament);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Single elimination has no finals bracket to apply the threshold to
fn championship_ignored(args: &TournamentArgs) -> bool {
    args.single && args.championship != 1
}

/// Coin flip between the two teams in an active match
fn play_game(m: &Match, rng: &mut ChaCha8Rng) -> Option<String> {
    let team1 = m.team1_id.as_ref()?;
    let team2 = m.team2_id.as_ref()?;
    let winner = if rng.gen_bool(0.5) { team1 } else { team2 };
    Some(winner.clone())
}

fn describe_match(tournament: &Tournament, m: &Match) -> String {
    let slot = |id: &Option<String>| {
        id.as_deref()
            .map_or_else(|| "(open)".to_string(), |id| team_name(tournament, id).to_string())
    };
    let result = match &m.winner_id {
        Some(winner) => format!(" -> {}", team_name(tournament, winner)),
        None => String::new(),
    };
    format!(
        "{:<14} {} ({}) vs {} ({}){}",
        m.id,
        slot(&m.team1_id),
        m.team1_wins,
        slot(&m.team2_id),
        m.team2_wins,
        result
    )
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn team_name<'a>(tournament: &'a Tournament, id: &'a str) -> &'a str {
    tournament.team(id).map_or(id, |t| t.name())
}

fn bracket_label(bracket: Bracket) -> &'static str {
    match bracket {
        Bracket::Winner => "Winners",
        Bracket::Loser => "Losers",
        Bracket::Final => "Finals",
    }
}

fn print_json_results(tournament: &Tournament) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        tournament: &'a Tournament,
        standings: Vec<Standing>,
    }

    let output = JsonOutput {
        tournament,
        standings: tournament.standings(),
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize tournament")?;
    println!("{}", json);
    Ok(())
}

fn print_text_results(tournament: &Tournament) {
    println!("\n=== {} ({}) ===", tournament.name, tournament.id);
    for bracket in [Bracket::Winner, Bracket::Loser, Bracket::Final] {
        for round in tournament.rounds_in(bracket) {
            println!("\n{} - Round {}", bracket_label(bracket), round.round_number);
            for m in &round.matches {
                println!("  {}", describe_match(tournament, m));
            }
        }
    }

    println!("\n=== Standings ===");
    println!("{:<20} {:>4} {:>6}  Status", "Team", "Wins", "Losses");
    for standing in tournament.standings() {
        println!(
            "{:<20} {:>4} {:>6}  {}",
            standing.name, standing.wins, standing.losses, standing.status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_finishes() {
        let mut rng = create_rng(Some(3));
        let names: Vec<String> = (1..=8).map(|i| format!("Team {}", i)).collect();
        let settings = TournamentSettings::double_elimination(2);
        let t = Tournament::from_team_names("Sim", &names, settings, &mut rng).unwrap();

        let done = simulate(t, &mut rng).unwrap();
        assert!(done.is_finished());
        assert!(done.active_matches().is_empty());
    }

    fn args(single: bool, championship: u32) -> TournamentArgs {
        TournamentArgs {
            teams: PathBuf::from("teams.json"),
            name: String::new(),
            single,
            prelim: 2,
            championship,
            json: false,
        }
    }

    #[test]
    fn test_championship_only_counts_for_double_elimination() {
        assert!(championship_ignored(&args(true, 3)));
        assert!(!championship_ignored(&args(true, 1)));
        assert!(!championship_ignored(&args(false, 3)));

        let settings = build_settings(&args(false, 3));
        assert!(settings.double_elimination);
        assert_eq!(settings.wins_required(Bracket::Winner), 2);
        assert_eq!(settings.wins_required(Bracket::Final), 3);
    }

    #[test]
    fn test_describe_match() {
        let mut rng = create_rng(Some(1));
        let settings = TournamentSettings::default();
        let t = Tournament::from_team_names("Sim", &["Otters", "Herons"], settings, &mut rng).unwrap();
        let line = describe_match(&t, &t.rounds[0].matches[0]);
        assert!(line.starts_with("winner_r1_m1"));
        assert!(line.contains("Otters") && line.contains("Herons"));
        assert!(!line.contains("->"));
    }
}
