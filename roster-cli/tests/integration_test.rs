//! Integration tests for team generation and brackets
//!
//! Tests the full stack: roster files, partitioning, and tournament play

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use roster_core::{validate_partition, Player, Roster, SkillLevel, Team, WeightSettings};
use roster_teams::{generate_teams, is_size_balanced, skill_variance, PartitionConfig};
use roster_tournament::{Bracket, StandingStatus, Tournament, TournamentSettings};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Two players at every skill level
fn league_players() -> Vec<Player> {
    SkillLevel::ALL
        .iter()
        .flat_map(|&level| [level, level])
        .enumerate()
        .map(|(i, level)| Player::new(format!("p{}", i), level).with_name(format!("Player{}", i), ""))
        .collect()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("roster-it-{}-{}", std::process::id(), name))
}

/// Report random game winners until nothing is left to play
fn simulate(mut t: Tournament, rng: &mut ChaCha8Rng) -> Tournament {
    for _ in 0..1000 {
        let Some(m) = t.active_matches().first().map(|m| (*m).clone()) else {
            break;
        };
        let winner = if rng.gen_bool(0.5) { m.team1_id } else { m.team2_id };
        t = t.try_progress(&m.id, &winner.unwrap()).unwrap();
    }
    t
}

// ============================================================================
// PARTITION TESTS
// ============================================================================

#[test]
fn test_snake_draft_evens_out_paired_levels() {
    let players = league_players();
    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let teams = generate_teams(
            &players,
            4,
            &WeightSettings::default(),
            &PartitionConfig::snake_draft(),
            &mut rng,
        );
        assert_eq!(teams.len(), 4);
        assert!(skill_variance(&teams) < 1e-12, "seed {}", seed);
    }
}

#[test]
fn test_balanced_partition_is_valid() {
    let players = league_players();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let config = PartitionConfig::balanced(5).with_refinement(50);
    let teams = generate_teams(&players, 3, &WeightSettings::default(), &config, &mut rng);

    assert_eq!(teams.len(), 3);
    assert!(is_size_balanced(&teams));
    assert!(validate_partition(&teams).is_ok());
    let placed: usize = teams.iter().map(Team::len).sum();
    assert_eq!(placed, players.len());

    let ids: Vec<&str> = teams.iter().map(Team::id).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn test_roster_file_to_team_file() {
    let roster_path = temp_path("roster.json");
    let teams_path = temp_path("teams.json");

    let roster = Roster::new(league_players(), WeightSettings::skill_only());
    roster.save(&roster_path).unwrap();
    let loaded = Roster::load(&roster_path).unwrap();
    assert_eq!(loaded, roster);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let teams = generate_teams(
        &loaded.players,
        4,
        &loaded.weights,
        &PartitionConfig::balanced(3).sequential(),
        &mut rng,
    );
    Team::save_all(&teams, &teams_path).unwrap();
    let reloaded = Team::load_all(&teams_path).unwrap();
    assert_eq!(reloaded, teams);

    std::fs::remove_file(&roster_path).ok();
    std::fs::remove_file(&teams_path).ok();
}

// ============================================================================
// FULL PIPELINE TESTS
// ============================================================================

#[test]
fn test_partition_then_double_elimination() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let teams = generate_teams(
        &league_players(),
        8,
        &WeightSettings::default(),
        &PartitionConfig::balanced(5),
        &mut rng,
    );
    assert_eq!(teams.len(), 8);

    let settings = TournamentSettings::double_elimination(2).with_championship_matches(3);
    let t = Tournament::new("League Finals", &teams, settings, &mut rng).unwrap();
    let done = simulate(t, &mut rng);

    assert!(done.is_finished());
    assert!(done.rounds_in(Bracket::Loser).count() > 0);
    let finals = done.rounds_in(Bracket::Final).next().unwrap();
    assert!(finals
        .matches
        .iter()
        .all(|m| m.team1_wins.max(m.team2_wins) == 3));

    let standings = done.standings();
    let completed = done.matches().filter(|m| m.is_complete).count() as u32;
    assert_eq!(standings.iter().map(|s| s.wins).sum::<u32>(), completed);
    assert_eq!(standings[0].status, StandingStatus::Winner);
    assert_eq!(standings[1].status, StandingStatus::RunnerUp);
    assert!(standings[2..]
        .iter()
        .all(|s| s.status == StandingStatus::Eliminated));
}

#[test]
fn test_byot_single_elimination_many_seeds() {
    let names: Vec<String> = ["Otters", "Herons", "Foxes", "Moles", "Wrens", "Voles", "Newts", "Crows"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let t = Tournament::from_team_names(
            "Pickup Night",
            &names,
            TournamentSettings::single_elimination(1),
            &mut rng,
        )
        .unwrap();
        let done = simulate(t, &mut rng);
        assert!(done.is_finished(), "seed {}", seed);
        assert_eq!(done.matches().count(), 7);
        assert_eq!(done.alive_teams().count(), 1);
    }
}

#[test]
fn test_double_elimination_never_stalls() {
    for teams in [2usize, 4, 8, 16] {
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let names: Vec<String> = (0..teams).map(|i| format!("Team {}", i)).collect();
            let t = Tournament::from_team_names("", &names, TournamentSettings::default(), &mut rng)
                .unwrap();
            let done = simulate(t, &mut rng);
            assert!(done.is_finished(), "{} teams, seed {}", teams, seed);
            assert!(done.rounds.iter().all(|r| r.is_complete()));
            let eliminated = done.teams.iter().filter(|t| t.losses >= 2).count();
            assert_eq!(eliminated, teams - 1);
        }
    }
}

#[test]
fn test_reset_midway_replays_cleanly() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let names: Vec<String> = (0..4).map(|i| format!("Team {}", i)).collect();
    let t = Tournament::from_team_names("Cup", &names, TournamentSettings::default(), &mut rng)
        .unwrap();

    let first = t.active_matches()[0].clone();
    let partial = t.progress(&first.id, first.team1_id.as_deref().unwrap());
    let fresh = partial.reset(&mut rng);
    assert!(fresh.standings().iter().all(|s| s.wins == 0 && s.losses == 0));

    let done = simulate(fresh, &mut rng);
    assert!(done.is_finished());
    // the snapshot taken before reset still shows its result
    assert!(partial.find_match(&first.id).unwrap().is_complete);
}
