//! Team partitioning - strategy dispatch plus the random and snake-draft dealers
//!
//! Level 1 - Orchestration and Level 3 - Steps

use rand::seq::SliceRandom;
use rand::Rng;
use roster_core::{Player, Team, WeightSettings};

use crate::balanced::balanced_groups;
use crate::config::{PartitionConfig, Strategy};
use crate::selection::best_of_runs;

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Partition a player pool into `number_of_teams` named teams.
///
/// An empty pool or zero teams yields no teams. Team sizes never differ by
/// more than one, whatever the strategy.
pub fn generate_teams<R: Rng>(
    players: &[Player],
    number_of_teams: usize,
    weights: &WeightSettings,
    config: &PartitionConfig,
    rng: &mut R,
) -> Vec<Team> {
    if players.is_empty() || number_of_teams == 0 {
        return Vec::new();
    }

    let groups = match config.strategy {
        Strategy::Random => random_groups(players, number_of_teams, rng),
        Strategy::SnakeDraft => snake_draft_groups(players, number_of_teams, rng),
        Strategy::Balanced => best_of_runs(
            players,
            number_of_teams,
            weights,
            config.runs,
            config.parallel,
            config.refine_iterations,
            rng,
        ),
    };

    debug_assert!(is_size_balanced(&groups), "partition left teams unbalanced");
    tracing::debug!(
        "Partitioned {} players into {} teams ({:?}): sizes {:?}",
        players.len(),
        number_of_teams,
        config.strategy,
        groups.iter().map(Vec::len).collect::<Vec<_>>()
    );

    Team::numbered(groups, rng)
}

/// Single balanced run, without multi-run selection
pub fn balanced_teams<R: Rng>(
    players: &[Player],
    number_of_teams: usize,
    weights: &WeightSettings,
    rng: &mut R,
) -> Vec<Team> {
    let groups = balanced_groups(players, number_of_teams, weights, rng);
    Team::numbered(groups, rng)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Shuffle and deal round-robin
pub fn random_groups<R: Rng>(players: &[Player], team_count: usize, rng: &mut R) -> Vec<Vec<Player>> {
    if players.is_empty() || team_count == 0 {
        return Vec::new();
    }

    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    let mut groups: Vec<Vec<Player>> = vec![Vec::new(); team_count];
    for (i, player) in shuffled.into_iter().enumerate() {
        groups[i % team_count].push(player);
    }
    groups
}

/// Sort by rating (descending, random among equals) and deal in snake order
pub fn snake_draft_groups<R: Rng>(players: &[Player], team_count: usize, rng: &mut R) -> Vec<Vec<Player>> {
    if players.is_empty() || team_count == 0 {
        return Vec::new();
    }

    // Shuffle first so the stable sort leaves equal ratings in random order
    let mut ranked = players.to_vec();
    ranked.shuffle(rng);
    ranked.sort_by(|a, b| b.rating().cmp(&a.rating()));

    let mut groups: Vec<Vec<Player>> = vec![Vec::new(); team_count];
    for (pick, player) in ranked.into_iter().enumerate() {
        groups[snake_slot(pick, team_count)].push(player);
    }
    groups
}

/// Team receiving the `pick`-th draft pick: 0..n-1, then n-1..0, repeating
pub fn snake_slot(pick: usize, team_count: usize) -> usize {
    let pass = pick / team_count;
    let offset = pick % team_count;
    if pass % 2 == 0 {
        offset
    } else {
        team_count - 1 - offset
    }
}

/// True when group sizes differ by at most one
pub fn is_size_balanced<G: AsRef<[Player]>>(groups: &[G]) -> bool {
    let sizes = groups.iter().map(|g| g.as_ref().len());
    match (sizes.clone().max(), sizes.min()) {
        (Some(max), Some(min)) => max - min <= 1,
        _ => true,
    }
}
